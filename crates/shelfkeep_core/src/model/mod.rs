//! Catalog domain model.
//!
//! # Responsibility
//! - Define the book and user records shared by storage and service layers.
//! - Validate text fields against the constraints of the record format.
//!
//! # Invariants
//! - Book and user ids are expected to be unique within their collection,
//!   but uniqueness is not enforced here.
//! - Text fields never contain the record separator (`,`) or line breaks.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod book;
pub mod user;

/// Integer key shared by books and users.
pub type RecordId = i64;

/// Field-level validation failure for catalog records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValidationError {
    /// Required text field is empty after trimming.
    Empty { field: &'static str },
    /// Field contains a character the record format cannot carry.
    ReservedCharacter { field: &'static str, value: String },
}

impl Display for FieldValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::ReservedCharacter { field, value } => write!(
                f,
                "{field} must not contain commas or line breaks, got `{value}`"
            ),
        }
    }
}

impl Error for FieldValidationError {}

pub(crate) fn validate_field(field: &'static str, value: &str) -> Result<(), FieldValidationError> {
    if value.trim().is_empty() {
        return Err(FieldValidationError::Empty { field });
    }
    if value.contains([',', '\n', '\r']) {
        return Err(FieldValidationError::ReservedCharacter {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
