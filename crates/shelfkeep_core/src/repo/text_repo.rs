//! Flat-file catalog backend.
//!
//! # Invariants
//! - A missing record file loads as an empty collection.
//! - Saves write a sibling temporary file and rename it over the target,
//!   so readers see either the old or the new record set.

use super::record::{decode_books, decode_users, encode_book, encode_user, ParseError};
use super::{CatalogRepository, RepoError, RepoResult};
use crate::model::book::Book;
use crate::model::user::User;
use log::{debug, error};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

pub const DEFAULT_BOOKS_FILE: &str = "books.txt";
pub const DEFAULT_USERS_FILE: &str = "users.txt";

/// Locations of the two record files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCatalogPaths {
    pub books: PathBuf,
    pub users: PathBuf,
}

impl TextCatalogPaths {
    /// Uses the default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            books: dir.join(DEFAULT_BOOKS_FILE),
            users: dir.join(DEFAULT_USERS_FILE),
        }
    }
}

impl Default for TextCatalogPaths {
    fn default() -> Self {
        Self {
            books: PathBuf::from(DEFAULT_BOOKS_FILE),
            users: PathBuf::from(DEFAULT_USERS_FILE),
        }
    }
}

/// Catalog repository over `books.txt` / `users.txt` style record files.
#[derive(Debug, Clone)]
pub struct TextCatalogRepository {
    paths: TextCatalogPaths,
}

impl TextCatalogRepository {
    pub fn new(paths: TextCatalogPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &TextCatalogPaths {
        &self.paths
    }
}

impl CatalogRepository for TextCatalogRepository {
    fn load_books(&self) -> RepoResult<Vec<Book>> {
        load_records(&self.paths.books, "books", decode_books)
    }

    fn load_users(&self) -> RepoResult<Vec<User>> {
        load_records(&self.paths.users, "users", decode_users)
    }

    fn save_books(&self, books: &[Book]) -> RepoResult<()> {
        save_records(&self.paths.books, "books", books, encode_book)
    }

    fn save_users(&self, users: &[User]) -> RepoResult<()> {
        save_records(&self.paths.users, "users", users, encode_user)
    }
}

fn load_records<T>(
    path: &Path,
    collection: &'static str,
    decode: fn(&str, &[u8]) -> Result<Vec<T>, ParseError>,
) -> RepoResult<Vec<T>> {
    let started_at = Instant::now();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("event=catalog_load module=repo status=missing collection={collection}");
            return Ok(Vec::new());
        }
        Err(source) => {
            error!(
                "event=catalog_load module=repo status=error collection={collection} error={source}"
            );
            return Err(RepoError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let records = decode(&path.display().to_string(), &bytes).map_err(|err| {
        error!(
            "event=catalog_load module=repo status=error collection={collection} line={} \
             error_code=parse_failed",
            err.line
        );
        err
    })?;

    debug!(
        "event=catalog_load module=repo status=ok collection={collection} count={} duration_ms={}",
        records.len(),
        started_at.elapsed().as_millis()
    );
    Ok(records)
}

fn save_records<T>(
    path: &Path,
    collection: &'static str,
    records: &[T],
    encode: fn(&T) -> String,
) -> RepoResult<()> {
    let started_at = Instant::now();
    let io_error = |source: io::Error| {
        error!(
            "event=catalog_save module=repo status=error collection={collection} error={source}"
        );
        RepoError::Io {
            path: path.to_path_buf(),
            source,
        }
    };

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(io_error)?;

    let mut file = NamedTempFile::new_in(parent).map_err(io_error)?;
    for record in records {
        writeln!(file, "{}", encode(record)).map_err(io_error)?;
    }
    file.as_file().sync_all().map_err(io_error)?;
    file.persist(path).map_err(|err| io_error(err.error))?;

    debug!(
        "event=catalog_save module=repo status=ok collection={collection} count={} duration_ms={}",
        records.len(),
        started_at.elapsed().as_millis()
    );
    Ok(())
}
