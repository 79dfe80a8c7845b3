mod common;

use common::{mockingbird, pride_and_prejudice, RecordingRepository};
use shelfkeep_core::{
    Book, BorrowOutcome, LibraryManager, ReturnOutcome, ServiceError, TextCatalogPaths,
    TextCatalogRepository, User,
};
use std::fs;

#[test]
fn borrow_return_scenario_leaves_both_books_available() {
    let dir = tempfile::tempdir().unwrap();
    let repo = TextCatalogRepository::new(TextCatalogPaths::in_dir(dir.path()));
    let mut manager = LibraryManager::open(repo).unwrap();

    manager.add_book(mockingbird()).unwrap();
    manager.add_book(pride_and_prejudice()).unwrap();

    let borrowed = manager.borrow_book(101, 2).unwrap();
    assert_eq!(
        borrowed,
        BorrowOutcome::Borrowed {
            book_id: 101,
            user_id: 2,
            title: "To Kill a Mockingbird".to_string(),
        }
    );
    assert_eq!(
        borrowed.to_string(),
        "Book 'To Kill a Mockingbird' borrowed by user ID 2."
    );
    assert!(!manager.find_book(101).unwrap().available);

    let returned = manager.return_book(101, 2).unwrap();
    assert!(returned.is_success());
    assert_eq!(
        returned.to_string(),
        "Book 'To Kill a Mockingbird' returned by user ID 2."
    );

    let listing: Vec<String> = manager.list_books().iter().map(ToString::to_string).collect();
    assert_eq!(
        listing,
        vec![
            "Book ID: 101, Title: To Kill a Mockingbird, Author: Harper Lee, Status: Available",
            "Book ID: 102, Title: Pride and Prejudice, Author: Jane Austen, Status: Available",
        ]
    );

    let persisted = fs::read_to_string(dir.path().join("books.txt")).unwrap();
    assert_eq!(
        persisted,
        "101,To Kill a Mockingbird,Harper Lee,True\n102,Pride and Prejudice,Jane Austen,True\n"
    );
}

#[test]
fn borrow_on_empty_catalog_reports_not_available() {
    let repo = RecordingRepository::default();
    let mut manager = LibraryManager::open(&repo).unwrap();

    let outcome = manager.borrow_book(999, 2).unwrap();
    assert_eq!(outcome, BorrowOutcome::NotAvailable { book_id: 999 });
    assert_eq!(outcome.to_string(), "Book with ID 999 is not available.");
    assert!(manager.list_books().is_empty());
    assert_eq!(repo.book_saves.get(), 1);
}

#[test]
fn add_book_lists_it_once_and_persists_it() {
    let repo = RecordingRepository::default();
    let mut manager = LibraryManager::open(&repo).unwrap();

    manager.add_book(mockingbird()).unwrap();

    let matches = manager.list_books().iter().filter(|book| book.id == 101).count();
    assert_eq!(matches, 1);
    assert_eq!(*repo.books.borrow(), vec![mockingbird()]);
}

#[test]
fn add_book_does_not_check_duplicate_ids() {
    let repo = RecordingRepository::default();
    let mut manager = LibraryManager::open(&repo).unwrap();

    manager.add_book(mockingbird()).unwrap();
    manager.add_book(Book::new(101, "Go Set a Watchman", "Harper Lee")).unwrap();

    assert_eq!(manager.list_books().len(), 2);
}

#[test]
fn borrowing_a_borrowed_book_changes_nothing() {
    let mut lent = mockingbird();
    lent.mark_as_borrowed();
    let repo = RecordingRepository::with_books(vec![lent.clone()]);
    let mut manager = LibraryManager::open(&repo).unwrap();

    let outcome = manager.borrow_book(101, 3).unwrap();
    assert!(!outcome.is_success());
    assert_eq!(manager.list_books(), &[lent]);
    assert_eq!(repo.book_saves.get(), 1);
}

#[test]
fn returning_an_available_or_unknown_book_changes_nothing() {
    let repo = RecordingRepository::with_books(vec![mockingbird()]);
    let mut manager = LibraryManager::open(&repo).unwrap();

    let on_shelf = manager.return_book(101, 2).unwrap();
    assert_eq!(on_shelf, ReturnOutcome::NotBorrowed { book_id: 101 });
    assert_eq!(on_shelf.to_string(), "Book with ID 101 was not borrowed.");

    let unknown = manager.return_book(555, 2).unwrap();
    assert_eq!(unknown, ReturnOutcome::NotBorrowed { book_id: 555 });

    assert_eq!(manager.list_books(), &[mockingbird()]);
    assert_eq!(repo.book_saves.get(), 2);
}

#[test]
fn borrow_then_return_restores_availability() {
    let repo = RecordingRepository::with_books(vec![mockingbird(), pride_and_prejudice()]);
    let mut manager = LibraryManager::open(&repo).unwrap();
    let before = manager.list_books().to_vec();

    manager.borrow_book(102, 7).unwrap();
    manager.return_book(102, 7).unwrap();

    assert_eq!(manager.list_books(), before.as_slice());
}

#[test]
fn borrow_picks_the_available_copy_among_duplicate_ids() {
    let mut first = mockingbird();
    first.mark_as_borrowed();
    let second = mockingbird();
    let repo = RecordingRepository::with_books(vec![first, second]);
    let mut manager = LibraryManager::open(&repo).unwrap();

    assert!(manager.borrow_book(101, 2).unwrap().is_success());
    assert!(manager.list_books().iter().all(|book| !book.available));
}

#[test]
fn update_overwrites_matching_book_fields() {
    let repo = RecordingRepository::with_books(vec![mockingbird(), pride_and_prejudice()]);
    let mut manager = LibraryManager::open(&repo).unwrap();

    let revised = Book::with_availability(102, "Emma", "J. Austen", false);
    assert!(manager.update_book(&revised).unwrap());

    assert_eq!(manager.find_book(102), Some(&revised));
    assert_eq!(manager.find_book(101), Some(&mockingbird()));
    assert_eq!(repo.books.borrow()[1], revised);
}

#[test]
fn update_with_unknown_id_keeps_content_but_still_persists() {
    let repo = RecordingRepository::with_books(vec![mockingbird()]);
    let mut manager = LibraryManager::open(&repo).unwrap();

    let matched = manager
        .update_book(&Book::new(404, "Missing", "Nobody"))
        .unwrap();

    assert!(!matched);
    assert_eq!(manager.list_books(), &[mockingbird()]);
    assert_eq!(repo.book_saves.get(), 1);
}

#[test]
fn delete_removes_every_book_with_the_id() {
    let repo = RecordingRepository::with_books(vec![
        mockingbird(),
        pride_and_prejudice(),
        Book::new(101, "Go Set a Watchman", "Harper Lee"),
    ]);
    let mut manager = LibraryManager::open(&repo).unwrap();

    assert_eq!(manager.delete_book(101).unwrap(), 2);
    assert_eq!(manager.list_books(), &[pride_and_prejudice()]);

    assert_eq!(manager.delete_book(101).unwrap(), 0);
    assert_eq!(repo.book_saves.get(), 2);
}

#[test]
fn register_user_appends_and_persists_users_only() {
    let repo = RecordingRepository::default();
    let mut manager = LibraryManager::open(&repo).unwrap();

    let user = User::member(2, "John Smith", "john.smith@gmail.com");
    manager.register_user(user.clone()).unwrap();

    assert_eq!(manager.list_users(), &[user.clone()]);
    assert_eq!(manager.find_user(2), Some(&user));
    assert_eq!(repo.user_saves.get(), 1);
    assert_eq!(repo.book_saves.get(), 0);
}

#[test]
fn unencodable_records_are_rejected_before_mutation() {
    let repo = RecordingRepository::with_books(vec![mockingbird()]);
    let mut manager = LibraryManager::open(&repo).unwrap();

    let err = manager
        .add_book(Book::new(103, "Eats, Shoots and Leaves", "Lynne Truss"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = manager
        .update_book(&Book::new(101, "To Kill a Mockingbird", "Lee, Harper"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = manager
        .register_user(User::member(9, "", "ghost@example.com"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    assert_eq!(manager.list_books(), &[mockingbird()]);
    assert!(manager.list_users().is_empty());
    assert_eq!(repo.book_saves.get(), 0);
    assert_eq!(repo.user_saves.get(), 0);
}

#[test]
fn storage_failure_surfaces_as_repo_error() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let repo = TextCatalogRepository::new(TextCatalogPaths::in_dir(&data_dir));
    let mut manager = LibraryManager::open(repo).unwrap();

    fs::write(&data_dir, "file in the way").unwrap();
    let err = manager.add_book(mockingbird()).unwrap_err();
    assert!(matches!(err, ServiceError::Repo(_)));
}
