//! The library aggregate and its on-disk documents.
//!
//! # Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── library_books.json        # [{book_id, title, author, genre, available}]
//! └── library_borrowers.json    # [{borrower_id, name, email, borrowed_books}]
//! ```
//!
//! Both documents are rewritten after every mutation.

pub mod catalog;
pub mod stats;
pub mod store;

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::InvalidGenre;
use crate::util::IdError;

pub use catalog::Library;
pub use stats::LibraryStats;
pub use store::DocumentError;

/// Errors raised by library operations
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error(transparent)]
    InvalidGenre(#[from] InvalidGenre),

    #[error(transparent)]
    Id(#[from] IdError),

    #[error("Failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    #[error("Failed to save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },
}

pub type Result<T> = std::result::Result<T, LibraryError>;
