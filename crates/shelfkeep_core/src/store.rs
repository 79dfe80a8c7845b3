//! In-memory catalog state synchronized with a repository.
//!
//! # Responsibility
//! - Own the book and user collections for the process lifetime.
//! - Load both collections at startup and flush a collection on demand.
//!
//! # Invariants
//! - Lookups are linear scans; catalogs are expected to be small.
//! - A flush always writes the full collection, never a delta.

use crate::model::book::Book;
use crate::model::user::User;
use crate::model::RecordId;
use crate::repo::{CatalogRepository, RepoResult};
use log::{error, info};
use std::time::Instant;

/// Authoritative catalog state plus the repository it persists to.
pub struct CatalogStore<R: CatalogRepository> {
    repo: R,
    books: Vec<Book>,
    users: Vec<User>,
}

impl<R: CatalogRepository> CatalogStore<R> {
    /// Loads both collections from `repo`.
    ///
    /// # Errors
    /// - Returns `RepoError::Parse` for any malformed record; startup must abort.
    /// - Returns `RepoError::Io` / `RepoError::Sqlite` when storage is unreadable.
    pub fn load(repo: R) -> RepoResult<Self> {
        let started_at = Instant::now();
        let loaded = repo
            .load_books()
            .and_then(|books| repo.load_users().map(|users| (books, users)));

        match loaded {
            Ok((books, users)) => {
                info!(
                    "event=store_load module=store status=ok books={} users={} duration_ms={}",
                    books.len(),
                    users.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(Self { repo, books, users })
            }
            Err(err) => {
                error!("event=store_load module=store status=error error={err}");
                Err(err)
            }
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub(crate) fn books_mut(&mut self) -> &mut Vec<Book> {
        &mut self.books
    }

    pub(crate) fn users_mut(&mut self) -> &mut Vec<User> {
        &mut self.users
    }

    /// First book with a matching id.
    pub fn find_book(&self, id: RecordId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// First user with a matching id.
    pub fn find_user(&self, id: RecordId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    /// Rewrites the persisted book record set from memory.
    pub fn save_books(&self) -> RepoResult<()> {
        self.repo.save_books(&self.books)
    }

    /// Rewrites the persisted user record set from memory.
    pub fn save_users(&self) -> RepoResult<()> {
        self.repo.save_users(&self.users)
    }
}
