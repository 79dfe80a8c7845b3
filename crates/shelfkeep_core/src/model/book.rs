//! Book catalog entry.
//!
//! # Invariants
//! - `available == true` means the book is on the shelf (state `Available`).
//! - A book only moves `Available -> Borrowed` through a successful borrow
//!   and `Borrowed -> Available` through a successful return.

use super::{validate_field, FieldValidationError, RecordId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Catalog item with its availability flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: RecordId,
    pub title: String,
    pub author: String,
    /// `false` while the book is lent out.
    pub available: bool,
}

/// Loan state derived from the availability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookState {
    Available,
    Borrowed,
}

impl Book {
    /// Creates a book that starts on the shelf.
    pub fn new(id: RecordId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self::with_availability(id, title, author, true)
    }

    /// Creates a book with an explicit availability flag, as loaded from storage.
    pub fn with_availability(
        id: RecordId,
        title: impl Into<String>,
        author: impl Into<String>,
        available: bool,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            available,
        }
    }

    pub fn state(&self) -> BookState {
        if self.available {
            BookState::Available
        } else {
            BookState::Borrowed
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn mark_as_borrowed(&mut self) {
        self.available = false;
    }

    pub fn mark_as_returned(&mut self) {
        self.available = true;
    }

    /// Human-readable availability label used in listings.
    pub fn status_label(&self) -> &'static str {
        match self.state() {
            BookState::Available => "Available",
            BookState::Borrowed => "Unavailable",
        }
    }

    /// Checks that title and author can be written as a single record line.
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        validate_field("title", &self.title)?;
        validate_field("author", &self.author)
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Book ID: {}, Title: {}, Author: {}, Status: {}",
            self.id,
            self.title,
            self.author,
            self.status_label()
        )
    }
}
