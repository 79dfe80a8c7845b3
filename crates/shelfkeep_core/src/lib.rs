//! Core record management for the Shelfkeep library catalog.
//! This crate owns the book/user model, persistence and loan state rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::{Book, BookState};
pub use model::user::{Role, User};
pub use model::{FieldValidationError, RecordId};
pub use repo::sqlite_repo::SqliteCatalogRepository;
pub use repo::text_repo::{TextCatalogPaths, TextCatalogRepository};
pub use repo::{CatalogRepository, ParseError, RepoError, RepoResult};
pub use service::library_manager::{
    BorrowOutcome, LibraryManager, ReturnOutcome, ServiceError, ServiceResult,
};
pub use service::roles::{
    BookAction, Librarian, ManageOutcome, Member, RoleError, UnknownBookAction,
};
pub use store::CatalogStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
