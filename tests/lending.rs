//! Lending Integration Tests
//!
//! Tests for checkout and return rules, borrower holdings, search and
//! statistics through the public `Library` API.

use serde_json::json;
use shelf::{BookField, Criteria, Genre, Library, LibraryConfig, MAX_BOOKS};
use tempfile::TempDir;

fn open(temp: &TempDir) -> Library {
    Library::open(LibraryConfig::new(temp.path())).unwrap()
}

/// One available book and one borrower with nothing on loan
fn library_with_book_and_borrower(temp: &TempDir) -> Library {
    let mut library = open(temp);
    library.add_book("Python 101", "Smith", "Technology").unwrap();
    library.add_borrower("Ada Lovelace", "ada@example.com").unwrap();
    library
}

#[test]
fn test_add_book_to_empty_library() {
    let temp = TempDir::new().unwrap();
    let mut library = open(&temp);

    let book = library.add_book("Python 101", "Smith", "Technology").unwrap();
    assert_eq!(book.book_id, "BOOK_0001");
    assert!(book.available);

    let content = std::fs::read_to_string(temp.path().join("library_books.json")).unwrap();
    let document: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(
        document,
        json!([{
            "book_id": "BOOK_0001",
            "title": "Python 101",
            "author": "Smith",
            "genre": "Technology",
            "available": true
        }])
    );
}

#[test]
fn test_checkout_updates_book_and_borrower() {
    let temp = TempDir::new().unwrap();
    let mut library = library_with_book_and_borrower(&temp);

    assert!(library.checkout_book("BOOK_0001", "BORROWER_0001").unwrap());
    assert!(library.get_available_books().is_empty());

    let held = library.get_borrower_books("BORROWER_0001");
    assert_eq!(held.len(), 1);
    assert_eq!(held[0].book_id, "BOOK_0001");
    assert!(!held[0].available);
}

#[test]
fn test_checkout_unavailable_book_fails() {
    let temp = TempDir::new().unwrap();
    let mut library = library_with_book_and_borrower(&temp);
    library.add_borrower("Grace Hopper", "grace@example.com").unwrap();

    assert!(library.checkout_book("BOOK_0001", "BORROWER_0001").unwrap());
    assert!(!library.checkout_book("BOOK_0001", "BORROWER_0002").unwrap());

    assert!(library.borrower("BORROWER_0002").unwrap().borrowed_books().is_empty());
    assert_eq!(
        library.borrower("BORROWER_0001").unwrap().borrowed_books(),
        ["BOOK_0001"]
    );
}

#[test]
fn test_checkout_unknown_ids_fail_without_mutation() {
    let temp = TempDir::new().unwrap();
    let mut library = library_with_book_and_borrower(&temp);
    let before = std::fs::read_to_string(temp.path().join("library_books.json")).unwrap();

    assert!(!library.checkout_book("BOOK_0099", "BORROWER_0001").unwrap());
    assert!(!library.checkout_book("BOOK_0001", "BORROWER_0099").unwrap());

    assert!(library.book("BOOK_0001").unwrap().available);
    assert!(library.borrower("BORROWER_0001").unwrap().borrowed_books().is_empty());

    let after = std::fs::read_to_string(temp.path().join("library_books.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_checkout_borrower_at_limit_fails() {
    let temp = TempDir::new().unwrap();
    let mut library = open(&temp);
    library.add_borrower("Ada Lovelace", "ada@example.com").unwrap();
    for i in 0..=MAX_BOOKS {
        library
            .add_book(&format!("Volume {}", i + 1), "Gibbon", "History")
            .unwrap();
    }

    for id in ["BOOK_0001", "BOOK_0002", "BOOK_0003"] {
        assert!(library.checkout_book(id, "BORROWER_0001").unwrap());
    }

    assert!(!library.checkout_book("BOOK_0004", "BORROWER_0001").unwrap());
    assert!(library.book("BOOK_0004").unwrap().available);
    assert_eq!(
        library.borrower("BORROWER_0001").unwrap().borrowed_books(),
        ["BOOK_0001", "BOOK_0002", "BOOK_0003"]
    );
}

#[test]
fn test_return_restores_availability() {
    let temp = TempDir::new().unwrap();
    let mut library = library_with_book_and_borrower(&temp);
    assert!(library.checkout_book("BOOK_0001", "BORROWER_0001").unwrap());

    assert!(library.return_book("BOOK_0001", "BORROWER_0001").unwrap());

    assert!(library.book("BOOK_0001").unwrap().available);
    assert!(library.get_borrower_books("BORROWER_0001").is_empty());
    assert_eq!(library.get_available_books().len(), 1);

    // The returned book can be lent again
    assert!(library.checkout_book("BOOK_0001", "BORROWER_0001").unwrap());
}

#[test]
fn test_return_requires_holding_borrower() {
    let temp = TempDir::new().unwrap();
    let mut library = library_with_book_and_borrower(&temp);
    library.add_borrower("Grace Hopper", "grace@example.com").unwrap();
    assert!(library.checkout_book("BOOK_0001", "BORROWER_0001").unwrap());

    assert!(!library.return_book("BOOK_0001", "BORROWER_0002").unwrap());
    assert!(!library.return_book("BOOK_0099", "BORROWER_0001").unwrap());
    assert!(!library.return_book("BOOK_0001", "BORROWER_0099").unwrap());

    assert!(!library.book("BOOK_0001").unwrap().available);
    assert_eq!(
        library.borrower("BORROWER_0001").unwrap().borrowed_books(),
        ["BOOK_0001"]
    );
}

#[test]
fn test_borrower_books_for_unknown_borrower() {
    let temp = TempDir::new().unwrap();
    let library = library_with_book_and_borrower(&temp);
    assert!(library.get_borrower_books("BORROWER_0042").is_empty());
}

#[test]
fn test_borrower_books_skip_missing_ids() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("library_books.json"),
        r#"[{"book_id": "BOOK_0001", "title": "Kept", "author": "A", "genre": "Science", "available": false}]"#,
    )
    .unwrap();
    std::fs::write(
        temp.path().join("library_borrowers.json"),
        r#"[{"borrower_id": "BORROWER_0001", "name": "Ada", "email": "a@x", "borrowed_books": ["BOOK_0007", "BOOK_0001"]}]"#,
    )
    .unwrap();

    let library = open(&temp);
    let held = library.get_borrower_books("BORROWER_0001");
    assert_eq!(held.len(), 1);
    assert_eq!(held[0].title, "Kept");
}

#[test]
fn test_search_author_case_insensitive() {
    let temp = TempDir::new().unwrap();
    let mut library = open(&temp);
    library.add_book("Python 101", "smith", "Technology").unwrap();
    library.add_book("Java Guide", "SMITH", "Technology").unwrap();
    library.add_book("Rust in Action", "Smith", "Technology").unwrap();
    library.add_book("Python Advanced", "Jones", "Technology").unwrap();

    for query in ["Smith", "smith", "SMITH"] {
        let criteria = Criteria::new().with(BookField::Author, query);
        let ids: Vec<&str> = library
            .search_books(&criteria)
            .into_iter()
            .map(|b| b.book_id.as_str())
            .collect();
        assert_eq!(ids, ["BOOK_0001", "BOOK_0002", "BOOK_0003"]);
    }
}

#[test]
fn test_search_combines_fields() {
    let temp = TempDir::new().unwrap();
    let mut library = library_with_book_and_borrower(&temp);
    library.add_book("Cosmos", "Sagan", "Science").unwrap();
    library.add_book("Contact", "Sagan", "Fiction").unwrap();
    library.checkout_book("BOOK_0002", "BORROWER_0001").unwrap();

    let criteria = Criteria::new()
        .with(BookField::Author, "sagan")
        .with(BookField::Available, true);
    let found = library.search_books(&criteria);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Contact");

    let criteria = Criteria::new().with(BookField::Genre, "non-fiction");
    assert!(library.search_books(&criteria).is_empty());
}

#[test]
fn test_statistics() {
    let temp = TempDir::new().unwrap();
    let mut library = open(&temp);
    library.add_book("Dune", "Herbert", "Fiction").unwrap();
    library.add_book("Emma", "Austen", "Fiction").unwrap();
    library.add_book("Cosmos", "Sagan", "Science").unwrap();

    // Check out one Fiction book, then drop the borrower from the documents
    // so the library has no borrowers but keeps the checked-out state.
    library.add_borrower("Ada", "ada@example.com").unwrap();
    library.checkout_book("BOOK_0002", "BORROWER_0001").unwrap();
    std::fs::write(temp.path().join("library_borrowers.json"), "[]").unwrap();
    let library = open(&temp);

    let stats = library.get_statistics();
    assert_eq!(
        serde_json::to_value(&stats).unwrap(),
        json!({
            "total_books": 3,
            "available_books": 2,
            "checked_out": 1,
            "total_borrowers": 0,
            "books_by_genre": {
                "Fiction": 2,
                "Science": 1,
                "Non-Fiction": 0,
                "History": 0,
                "Technology": 0
            }
        })
    );
    assert_eq!(stats.genre_count(Genre::Fiction), 2);
}
