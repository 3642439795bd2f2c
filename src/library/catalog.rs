//! The library aggregate: owns every book and borrower and keeps the
//! documents on disk in step with memory.
//!
//! Business-rule failures (unknown IDs, unavailable book, borrower at the
//! limit) are reported as `Ok(false)` and leave state untouched. Only I/O,
//! data and validation problems are errors.

use indexmap::IndexMap;
use tracing::{debug, info, instrument, warn};

use super::stats::LibraryStats;
use super::store::{load_document, save_document, DocumentError};
use super::{LibraryError, Result};
use crate::config::LibraryConfig;
use crate::domain::{Book, BookField, Borrower, BorrowerField, Genre, MAX_BOOKS};
use crate::util::{generate_id, Criteria};

const BOOK_PREFIX: &str = "BOOK";
const BORROWER_PREFIX: &str = "BORROWER";

/// Books and borrowers persisted to two JSON documents
#[derive(Debug)]
pub struct Library {
    config: LibraryConfig,

    /// book_id -> Book, in insertion order
    books: IndexMap<String, Book>,

    /// borrower_id -> Borrower, in insertion order
    borrowers: IndexMap<String, Borrower>,
}

impl Library {
    /// Create an empty library without touching the disk
    pub fn new(config: LibraryConfig) -> Self {
        Self {
            config,
            books: IndexMap::new(),
            borrowers: IndexMap::new(),
        }
    }

    /// Create a library and load any existing documents
    pub fn open(config: LibraryConfig) -> Result<Self> {
        let mut library = Self::new(config);
        library.load()?;
        Ok(library)
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Replace in-memory state with the documents on disk.
    ///
    /// Missing documents are empty collections. State is only replaced
    /// when both documents load cleanly.
    pub fn load(&mut self) -> Result<()> {
        let books_path = self.config.books_path();
        let books: Vec<Book> = load_document(&books_path).map_err(|source| LibraryError::Load {
            path: books_path.clone(),
            source,
        })?;

        let borrowers_path = self.config.borrowers_path();
        let borrowers: Vec<Borrower> =
            load_document(&borrowers_path).map_err(|source| LibraryError::Load {
                path: borrowers_path.clone(),
                source,
            })?;

        if let Some(over) = borrowers
            .iter()
            .find(|b| b.borrowed_books().len() > MAX_BOOKS)
        {
            return Err(LibraryError::Load {
                path: borrowers_path,
                source: DocumentError::Invalid(format!(
                    "{} holds {} books (limit {})",
                    over.borrower_id,
                    over.borrowed_books().len(),
                    MAX_BOOKS
                )),
            });
        }

        self.books = index_by(books, |b| b.book_id.clone(), "book");
        self.borrowers = index_by(borrowers, |b| b.borrower_id.clone(), "borrower");

        debug!(
            books = self.books.len(),
            borrowers = self.borrowers.len(),
            "Library loaded"
        );
        Ok(())
    }

    /// Write both documents, books first
    pub fn save(&self) -> Result<()> {
        let books_path = self.config.books_path();
        let books: Vec<&Book> = self.books.values().collect();
        save_document(&books_path, &books).map_err(|source| LibraryError::Save {
            path: books_path,
            source,
        })?;

        let borrowers_path = self.config.borrowers_path();
        let borrowers: Vec<&Borrower> = self.borrowers.values().collect();
        save_document(&borrowers_path, &borrowers).map_err(|source| LibraryError::Save {
            path: borrowers_path,
            source,
        })?;

        Ok(())
    }

    /// Add a book with a fresh `BOOK_nnnn` ID
    #[instrument(skip(self))]
    pub fn add_book(&mut self, title: &str, author: &str, genre: &str) -> Result<Book> {
        let genre: Genre = genre.parse()?;
        let book_id = generate_id(BOOK_PREFIX, self.books.keys().map(String::as_str))?;

        let book = Book::new(book_id.clone(), title, author, genre);
        self.books.insert(book_id.clone(), book.clone());
        self.save()?;

        info!(%book_id, "Book added");
        Ok(book)
    }

    /// Register a borrower with a fresh `BORROWER_nnnn` ID
    #[instrument(skip(self))]
    pub fn add_borrower(&mut self, name: &str, email: &str) -> Result<Borrower> {
        let borrower_id = generate_id(BORROWER_PREFIX, self.borrowers.keys().map(String::as_str))?;

        let borrower = Borrower::new(borrower_id.clone(), name, email);
        self.borrowers.insert(borrower_id.clone(), borrower.clone());
        self.save()?;

        info!(%borrower_id, "Borrower added");
        Ok(borrower)
    }

    /// Lend a book to a borrower.
    ///
    /// Requires an existing, available book that no borrower holds, and an
    /// existing borrower below the limit.
    #[instrument(skip(self))]
    pub fn checkout_book(&mut self, book_id: &str, borrower_id: &str) -> Result<bool> {
        let held = self.borrowers.values().any(|b| b.has_book(book_id));

        let (Some(book), Some(borrower)) = (
            self.books.get_mut(book_id),
            self.borrowers.get_mut(borrower_id),
        ) else {
            debug!("Checkout rejected: unknown book or borrower");
            return Ok(false);
        };

        if !book.available || held {
            debug!("Checkout rejected: book is checked out");
            return Ok(false);
        }

        if !borrower.borrow_book(book_id) {
            debug!(limit = MAX_BOOKS, "Checkout rejected: borrower at limit");
            return Ok(false);
        }
        book.available = false;

        self.save()?;
        info!("Book checked out");
        Ok(true)
    }

    /// Take a book back from the borrower holding it; the book becomes
    /// available again.
    #[instrument(skip(self))]
    pub fn return_book(&mut self, book_id: &str, borrower_id: &str) -> Result<bool> {
        let (Some(book), Some(borrower)) = (
            self.books.get_mut(book_id),
            self.borrowers.get_mut(borrower_id),
        ) else {
            debug!("Return rejected: unknown book or borrower");
            return Ok(false);
        };

        if !borrower.return_book(book_id) {
            debug!("Return rejected: book not held by borrower");
            return Ok(false);
        }
        book.available = true;

        self.save()?;
        info!("Book returned");
        Ok(true)
    }

    /// Books whose records satisfy every criterion
    pub fn search_books(&self, criteria: &Criteria<BookField>) -> Vec<&Book> {
        self.books
            .values()
            .filter(|book| criteria.matches(&book.to_record()))
            .collect()
    }

    /// Borrowers whose records satisfy every criterion
    pub fn search_borrowers(&self, criteria: &Criteria<BorrowerField>) -> Vec<&Borrower> {
        self.borrowers
            .values()
            .filter(|borrower| criteria.matches(&borrower.to_record()))
            .collect()
    }

    pub fn get_available_books(&self) -> Vec<&Book> {
        self.books.values().filter(|book| book.available).collect()
    }

    /// Books held by a borrower, skipping IDs no longer in the catalog
    pub fn get_borrower_books(&self, borrower_id: &str) -> Vec<&Book> {
        let Some(borrower) = self.borrowers.get(borrower_id) else {
            return Vec::new();
        };

        borrower
            .borrowed_books()
            .iter()
            .filter_map(|id| self.books.get(id))
            .collect()
    }

    pub fn get_statistics(&self) -> LibraryStats {
        LibraryStats::collect(self.books.values(), self.borrowers.len())
    }

    pub fn book(&self, book_id: &str) -> Option<&Book> {
        self.books.get(book_id)
    }

    pub fn borrower(&self, borrower_id: &str) -> Option<&Borrower> {
        self.borrowers.get(borrower_id)
    }

    /// All books in insertion order
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// All borrowers in insertion order
    pub fn borrowers(&self) -> impl Iterator<Item = &Borrower> {
        self.borrowers.values()
    }
}

/// Index records by ID in document order; a repeated ID keeps the later record.
fn index_by<T>(records: Vec<T>, id: impl Fn(&T) -> String, kind: &str) -> IndexMap<String, T> {
    let mut map = IndexMap::with_capacity(records.len());
    for record in records {
        let key = id(&record);
        if map.insert(key.clone(), record).is_some() {
            warn!(id = %key, "Duplicate {} ID in document", kind);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn library(temp: &TempDir) -> Library {
        Library::open(LibraryConfig::new(temp.path())).unwrap()
    }

    #[test]
    fn test_add_book_assigns_sequential_ids() {
        let temp = TempDir::new().unwrap();
        let mut lib = library(&temp);

        let first = lib.add_book("Python 101", "Smith", "Technology").unwrap();
        let second = lib.add_book("Dune", "Herbert", "Fiction").unwrap();

        assert_eq!(first.book_id, "BOOK_0001");
        assert_eq!(second.book_id, "BOOK_0002");
        assert_eq!(lib.books().count(), 2);
    }

    #[test]
    fn test_add_book_invalid_genre_leaves_state() {
        let temp = TempDir::new().unwrap();
        let mut lib = library(&temp);

        let err = lib.add_book("Cookbook", "Chef", "Cooking").unwrap_err();
        assert!(matches!(err, LibraryError::InvalidGenre(_)));
        assert_eq!(lib.books().count(), 0);
        assert!(!lib.config().books_path().exists());
    }

    #[test]
    fn test_add_book_with_malformed_existing_id() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("library_books.json"),
            r#"[{"book_id": "B-1", "title": "T", "author": "A", "genre": "History", "available": true}]"#,
        )
        .unwrap();
        let mut lib = library(&temp);

        let err = lib.add_book("Another", "Author", "History").unwrap_err();
        assert!(matches!(err, LibraryError::Id(_)));
    }

    #[test]
    fn test_checkout_rejects_book_held_elsewhere() {
        let temp = TempDir::new().unwrap();
        // Book marked available but still listed on a borrower
        std::fs::write(
            temp.path().join("library_books.json"),
            r#"[{"book_id": "BOOK_0001", "title": "T", "author": "A", "genre": "History", "available": true}]"#,
        )
        .unwrap();
        std::fs::write(
            temp.path().join("library_borrowers.json"),
            r#"[
                {"borrower_id": "BORROWER_0001", "name": "Ada", "email": "a@x", "borrowed_books": ["BOOK_0001"]},
                {"borrower_id": "BORROWER_0002", "name": "Bob", "email": "b@x", "borrowed_books": []}
            ]"#,
        )
        .unwrap();
        let mut lib = library(&temp);

        assert!(!lib.checkout_book("BOOK_0001", "BORROWER_0002").unwrap());
        assert!(lib.borrower("BORROWER_0002").unwrap().borrowed_books().is_empty());
        assert!(lib.book("BOOK_0001").unwrap().available);
    }

    #[test]
    fn test_duplicate_ids_keep_last_record() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("library_books.json"),
            r#"[
                {"book_id": "BOOK_0001", "title": "Old", "author": "A", "genre": "History", "available": true},
                {"book_id": "BOOK_0001", "title": "New", "author": "A", "genre": "History", "available": true}
            ]"#,
        )
        .unwrap();
        let lib = library(&temp);

        assert_eq!(lib.books().count(), 1);
        assert_eq!(lib.book("BOOK_0001").unwrap().title, "New");
    }

    #[test]
    fn test_search_borrowers() {
        let temp = TempDir::new().unwrap();
        let mut lib = library(&temp);
        lib.add_borrower("Ada Lovelace", "ada@example.com").unwrap();
        lib.add_borrower("Grace Hopper", "grace@example.com").unwrap();

        let criteria = Criteria::new().with(BorrowerField::Email, "GRACE@example.com");
        let found = lib.search_borrowers(&criteria);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].borrower_id, "BORROWER_0002");
    }

    #[test]
    fn test_name_comes_from_config() {
        let temp = TempDir::new().unwrap();
        let lib = Library::new(LibraryConfig::new(temp.path()).with_name("Branch"));
        assert_eq!(lib.name(), "Branch");
    }
}
