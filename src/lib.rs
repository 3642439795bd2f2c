//! shelf - library catalog manager
//!
//! Tracks books and borrowers, lends and takes back books, and keeps the
//! whole catalog in two JSON documents that are rewritten after every change.
//!
//! # Architecture
//!
//! The `Library` aggregate owns every entity and enforces the lending rules:
//! - A book can be held by one borrower at a time
//! - A borrower can hold at most three books
//! - Every successful mutation is written to disk before returning
//!
//! Single process, single user: there is no file locking, and concurrent
//! processes on the same data directory will overwrite each other.
//!
//! # Modules
//!
//! - `domain`: Entities (Book, Genre, Borrower)
//! - `library`: The aggregate, its documents and statistics
//! - `util`: ID generation, record matching, date formatting
//! - `config`: Data directory resolution
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! shelf add-book "Python 101" Smith Technology
//! shelf add-borrower "Ada Lovelace" ada@example.com
//! shelf checkout BOOK_0001 BORROWER_0001
//! shelf search --author smith
//! shelf stats
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;
pub mod util;

// Re-export main types at crate root for convenience
pub use config::LibraryConfig;
pub use domain::{Book, BookField, Borrower, BorrowerField, Genre, InvalidGenre, MAX_BOOKS};
pub use library::{Library, LibraryError, LibraryStats};
pub use util::{generate_id, search_items, Criteria, Record};
