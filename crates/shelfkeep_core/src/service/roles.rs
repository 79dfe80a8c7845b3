//! Role capabilities over the library manager.
//!
//! A `User` only reaches role-specific operations through a capability
//! handle obtained from its role tag: `as_librarian()` for catalog
//! maintenance, `as_member()` for borrowing and returning.

use crate::model::book::Book;
use crate::model::user::{Role, User};
use crate::model::RecordId;
use crate::repo::CatalogRepository;
use crate::service::library_manager::{BorrowOutcome, LibraryManager, ReturnOutcome, ServiceResult};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Capability request refused for the user's role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleError {
    MissingRole {
        user_id: RecordId,
        required: Role,
        actual: Role,
    },
}

impl Display for RoleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRole {
                user_id,
                required,
                actual,
            } => write!(f, "user {user_id} has role `{actual}`; `{required}` is required"),
        }
    }
}

impl Error for RoleError {}

/// Catalog maintenance action a librarian can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookAction {
    Add,
    Update,
    Delete,
}

/// Action name outside `add|update|delete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBookAction(pub String);

impl Display for UnknownBookAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown book action `{}`; expected add|update|delete", self.0)
    }
}

impl Error for UnknownBookAction {}

impl FromStr for BookAction {
    type Err = UnknownBookAction;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "add" => Ok(Self::Add),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(UnknownBookAction(other.to_string())),
        }
    }
}

/// What a librarian dispatch actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageOutcome {
    Added,
    Updated { matched: bool },
    Deleted { removed: usize },
    /// Unrecognized action name; nothing was touched or persisted.
    Ignored,
}

/// Capability handle for catalog maintenance.
#[derive(Debug, Clone, Copy)]
pub struct Librarian<'u> {
    user: &'u User,
}

/// Capability handle for lending operations.
#[derive(Debug, Clone, Copy)]
pub struct Member<'u> {
    user: &'u User,
}

impl User {
    pub fn as_librarian(&self) -> Result<Librarian<'_>, RoleError> {
        self.require(Role::Librarian).map(|user| Librarian { user })
    }

    pub fn as_member(&self) -> Result<Member<'_>, RoleError> {
        self.require(Role::Member).map(|user| Member { user })
    }

    fn require(&self, required: Role) -> Result<&Self, RoleError> {
        if self.role == required {
            Ok(self)
        } else {
            Err(RoleError::MissingRole {
                user_id: self.id,
                required,
                actual: self.role,
            })
        }
    }
}

impl<'u> Librarian<'u> {
    pub fn user(&self) -> &'u User {
        self.user
    }

    /// Applies `action` to the catalog. `Delete` removes by `book.id`.
    pub fn manage_books<R: CatalogRepository>(
        &self,
        manager: &mut LibraryManager<R>,
        book: Book,
        action: BookAction,
    ) -> ServiceResult<ManageOutcome> {
        match action {
            BookAction::Add => manager.add_book(book).map(|()| ManageOutcome::Added),
            BookAction::Update => manager
                .update_book(&book)
                .map(|matched| ManageOutcome::Updated { matched }),
            BookAction::Delete => manager
                .delete_book(book.id)
                .map(|removed| ManageOutcome::Deleted { removed }),
        }
    }

    /// String dispatch; unrecognized names are logged and ignored.
    pub fn manage_books_named<R: CatalogRepository>(
        &self,
        manager: &mut LibraryManager<R>,
        book: Book,
        action: &str,
    ) -> ServiceResult<ManageOutcome> {
        match action.parse::<BookAction>() {
            Ok(action) => self.manage_books(manager, book, action),
            Err(err) => {
                warn!(
                    "event=book_manage module=service status=ignored user_id={} error={err}",
                    self.user.id
                );
                Ok(ManageOutcome::Ignored)
            }
        }
    }
}

impl<'u> Member<'u> {
    pub fn user(&self) -> &'u User {
        self.user
    }

    pub fn borrow_book<R: CatalogRepository>(
        &self,
        manager: &mut LibraryManager<R>,
        book_id: RecordId,
    ) -> ServiceResult<BorrowOutcome> {
        manager.borrow_book(book_id, self.user.id)
    }

    pub fn return_book<R: CatalogRepository>(
        &self,
        manager: &mut LibraryManager<R>,
        book_id: RecordId,
    ) -> ServiceResult<ReturnOutcome> {
        manager.return_book(book_id, self.user.id)
    }
}
