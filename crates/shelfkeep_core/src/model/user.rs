//! Catalog user identity and role tag.
//!
//! Users are created on registration and never mutated afterwards.
//! The role decides which capability handle (`Librarian` / `Member`)
//! the user can obtain from the service layer.

use super::{validate_field, FieldValidationError, RecordId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Access role carried by every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Librarian,
    Member,
}

impl Role {
    /// Stable token used in persisted records.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Librarian => "librarian",
            Self::Member => "member",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "librarian" => Some(Self::Librarian),
            "member" => Some(Self::Member),
            _ => None,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn new(
        id: RecordId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    pub fn librarian(id: RecordId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::new(id, name, email, Role::Librarian)
    }

    pub fn member(id: RecordId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::new(id, name, email, Role::Member)
    }

    pub fn validate(&self) -> Result<(), FieldValidationError> {
        validate_field("name", &self.name)?;
        validate_field("email", &self.email)
    }
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "User ID: {}, Name: {}, Email: {}",
            self.id, self.name, self.email
        )
    }
}
