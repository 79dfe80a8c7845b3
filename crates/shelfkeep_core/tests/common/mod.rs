#![allow(dead_code)]

use shelfkeep_core::{Book, CatalogRepository, RepoResult, User};
use std::cell::{Cell, RefCell};

/// In-memory repository that counts every flush.
#[derive(Default)]
pub struct RecordingRepository {
    pub books: RefCell<Vec<Book>>,
    pub users: RefCell<Vec<User>>,
    pub book_saves: Cell<usize>,
    pub user_saves: Cell<usize>,
}

impl RecordingRepository {
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RefCell::new(books),
            ..Self::default()
        }
    }
}

impl CatalogRepository for &RecordingRepository {
    fn load_books(&self) -> RepoResult<Vec<Book>> {
        Ok(self.books.borrow().clone())
    }

    fn load_users(&self) -> RepoResult<Vec<User>> {
        Ok(self.users.borrow().clone())
    }

    fn save_books(&self, books: &[Book]) -> RepoResult<()> {
        self.book_saves.set(self.book_saves.get() + 1);
        *self.books.borrow_mut() = books.to_vec();
        Ok(())
    }

    fn save_users(&self, users: &[User]) -> RepoResult<()> {
        self.user_saves.set(self.user_saves.get() + 1);
        *self.users.borrow_mut() = users.to_vec();
        Ok(())
    }
}

pub fn mockingbird() -> Book {
    Book::new(101, "To Kill a Mockingbird", "Harper Lee")
}

pub fn pride_and_prejudice() -> Book {
    Book::new(102, "Pride and Prejudice", "Jane Austen")
}
