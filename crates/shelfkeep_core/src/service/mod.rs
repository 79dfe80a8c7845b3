//! Catalog use-case services.
//!
//! # Responsibility
//! - Expose catalog mutations with validation and persist after each one.
//! - Gate role-specific operations behind capability handles.

pub mod library_manager;
pub mod roles;
