//! Catalog repository contract and storage backends.
//!
//! # Responsibility
//! - Define whole-collection load/save for books and users.
//! - Keep the record format and SQL details out of store/service code.
//!
//! # Invariants
//! - `save_*` replaces the complete persisted collection; there are no
//!   incremental writes.
//! - Loading a collection that was never saved yields an empty vector.
//! - Malformed persisted data fails the load; nothing is partially recovered.

use crate::model::book::Book;
use crate::model::user::User;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod record;
pub mod sqlite_repo;
pub mod text_repo;

pub use record::ParseError;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-level failure while loading or saving catalog records.
#[derive(Debug)]
pub enum RepoError {
    /// A persisted record could not be decoded.
    Parse(ParseError),
    /// Reading or writing a record file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// SQLite backend failure.
    Sqlite(rusqlite::Error),
    /// Catalog database written by a newer binary.
    SchemaTooNew { found: u32, supported: u32 },
    /// Catalog database lacks a column the backend reads.
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Io { path, source } => {
                write!(f, "storage failure at `{}`: {source}", path.display())
            }
            Self::Sqlite(err) => write!(f, "catalog database failure: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "catalog database version {found} is newer than supported {supported}"
            ),
            Self::MissingColumn { table, column } => {
                write!(f, "catalog database is missing column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::MissingColumn { .. } => None,
        }
    }
}

impl From<ParseError> for RepoError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Whole-collection persistence for the catalog.
pub trait CatalogRepository {
    fn load_books(&self) -> RepoResult<Vec<Book>>;
    fn load_users(&self) -> RepoResult<Vec<User>>;
    fn save_books(&self, books: &[Book]) -> RepoResult<()>;
    fn save_users(&self, users: &[User]) -> RepoResult<()>;
}

impl<R: CatalogRepository + ?Sized> CatalogRepository for Box<R> {
    fn load_books(&self) -> RepoResult<Vec<Book>> {
        (**self).load_books()
    }

    fn load_users(&self) -> RepoResult<Vec<User>> {
        (**self).load_users()
    }

    fn save_books(&self, books: &[Book]) -> RepoResult<()> {
        (**self).save_books(books)
    }

    fn save_users(&self, users: &[User]) -> RepoResult<()> {
        (**self).save_users(users)
    }
}
