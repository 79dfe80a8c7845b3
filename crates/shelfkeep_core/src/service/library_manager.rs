//! Library manager: catalog mutations and loan state transitions.
//!
//! # Responsibility
//! - Apply add/update/delete/borrow/return/register to the catalog store.
//! - Flush the touched collection after every mutating call.
//!
//! # Invariants
//! - Borrow only succeeds on a book that is currently available; return only
//!   succeeds on a book that is currently borrowed.
//! - Soft failures (unknown id, wrong state) persist anyway and are reported
//!   through outcome values, not errors.
//! - Records with unencodable text are rejected before memory is touched.

use crate::model::book::Book;
use crate::model::user::User;
use crate::model::{FieldValidationError, RecordId};
use crate::repo::{CatalogRepository, RepoError, RepoResult};
use crate::store::CatalogStore;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for catalog use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Record text cannot be persisted.
    Validation(FieldValidationError),
    /// Storage failure while flushing or loading.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid record: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<FieldValidationError> for ServiceError {
    fn from(value: FieldValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Result of a borrow request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorrowOutcome {
    Borrowed {
        book_id: RecordId,
        user_id: RecordId,
        title: String,
    },
    /// The book is absent or already lent out; the two are not distinguished.
    NotAvailable { book_id: RecordId },
}

impl BorrowOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Borrowed { .. })
    }
}

impl Display for BorrowOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Borrowed { user_id, title, .. } => {
                write!(f, "Book '{title}' borrowed by user ID {user_id}.")
            }
            Self::NotAvailable { book_id } => write!(f, "Book with ID {book_id} is not available."),
        }
    }
}

/// Result of a return request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnOutcome {
    Returned {
        book_id: RecordId,
        user_id: RecordId,
        title: String,
    },
    /// The book is absent or already on the shelf.
    NotBorrowed { book_id: RecordId },
}

impl ReturnOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Returned { .. })
    }
}

impl Display for ReturnOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Returned { user_id, title, .. } => {
                write!(f, "Book '{title}' returned by user ID {user_id}.")
            }
            Self::NotBorrowed { book_id } => write!(f, "Book with ID {book_id} was not borrowed."),
        }
    }
}

/// Orchestrates catalog mutations over a [`CatalogStore`].
pub struct LibraryManager<R: CatalogRepository> {
    store: CatalogStore<R>,
}

impl<R: CatalogRepository> LibraryManager<R> {
    /// Loads the catalog from `repo`; malformed records abort with an error.
    pub fn open(repo: R) -> RepoResult<Self> {
        CatalogStore::load(repo).map(Self::new)
    }

    pub fn new(store: CatalogStore<R>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &CatalogStore<R> {
        &self.store
    }

    /// Appends `book` without a duplicate-id check, then persists books.
    pub fn add_book(&mut self, book: Book) -> ServiceResult<()> {
        book.validate()?;
        info!("event=book_add module=service status=ok book_id={}", book.id);
        self.store.books_mut().push(book);
        self.store.save_books()?;
        Ok(())
    }

    /// Overwrites title/author/availability of the first book sharing the id.
    ///
    /// Returns whether a book matched. Books are persisted either way.
    pub fn update_book(&mut self, updated: &Book) -> ServiceResult<bool> {
        updated.validate()?;
        let matched = match self
            .store
            .books_mut()
            .iter_mut()
            .find(|book| book.id == updated.id)
        {
            Some(book) => {
                book.title.clone_from(&updated.title);
                book.author.clone_from(&updated.author);
                book.available = updated.available;
                true
            }
            None => false,
        };

        if matched {
            info!("event=book_update module=service status=ok book_id={}", updated.id);
        } else {
            warn!("event=book_update module=service status=not_found book_id={}", updated.id);
        }
        self.store.save_books()?;
        Ok(matched)
    }

    /// Removes every book with the id and returns how many were removed.
    pub fn delete_book(&mut self, id: RecordId) -> ServiceResult<usize> {
        let books = self.store.books_mut();
        let before = books.len();
        books.retain(|book| book.id != id);
        let removed = before - books.len();

        if removed == 0 {
            warn!("event=book_delete module=service status=not_found book_id={id}");
        } else {
            info!("event=book_delete module=service status=ok book_id={id} removed={removed}");
        }
        self.store.save_books()?;
        Ok(removed)
    }

    /// Lends the first available book with `book_id` to `user_id`.
    pub fn borrow_book(
        &mut self,
        book_id: RecordId,
        user_id: RecordId,
    ) -> ServiceResult<BorrowOutcome> {
        let outcome = match self
            .store
            .books_mut()
            .iter_mut()
            .find(|book| book.id == book_id && book.is_available())
        {
            Some(book) => {
                book.mark_as_borrowed();
                BorrowOutcome::Borrowed {
                    book_id,
                    user_id,
                    title: book.title.clone(),
                }
            }
            None => BorrowOutcome::NotAvailable { book_id },
        };

        if outcome.is_success() {
            info!("event=book_borrow module=service status=ok book_id={book_id} user_id={user_id}");
        } else {
            warn!(
                "event=book_borrow module=service status=not_available \
                 book_id={book_id} user_id={user_id}"
            );
        }
        self.store.save_books()?;
        Ok(outcome)
    }

    /// Takes back the first borrowed book with `book_id`.
    pub fn return_book(
        &mut self,
        book_id: RecordId,
        user_id: RecordId,
    ) -> ServiceResult<ReturnOutcome> {
        let outcome = match self
            .store
            .books_mut()
            .iter_mut()
            .find(|book| book.id == book_id && !book.is_available())
        {
            Some(book) => {
                book.mark_as_returned();
                ReturnOutcome::Returned {
                    book_id,
                    user_id,
                    title: book.title.clone(),
                }
            }
            None => ReturnOutcome::NotBorrowed { book_id },
        };

        if outcome.is_success() {
            info!("event=book_return module=service status=ok book_id={book_id} user_id={user_id}");
        } else {
            warn!(
                "event=book_return module=service status=not_borrowed \
                 book_id={book_id} user_id={user_id}"
            );
        }
        self.store.save_books()?;
        Ok(outcome)
    }

    /// Appends `user` without a duplicate-id check, then persists users.
    pub fn register_user(&mut self, user: User) -> ServiceResult<()> {
        user.validate()?;
        info!(
            "event=user_register module=service status=ok user_id={} role={}",
            user.id, user.role
        );
        self.store.users_mut().push(user);
        self.store.save_users()?;
        Ok(())
    }

    /// All books in catalog order, unfiltered.
    pub fn list_books(&self) -> &[Book] {
        self.store.books()
    }

    pub fn list_users(&self) -> &[User] {
        self.store.users()
    }

    pub fn find_book(&self, id: RecordId) -> Option<&Book> {
        self.store.find_book(id)
    }

    pub fn find_user(&self, id: RecordId) -> Option<&User> {
        self.store.find_user(id)
    }
}
