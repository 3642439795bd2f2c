//! Catalog entities.
//!
//! - Book: a titled work with a genre from a fixed set
//! - Borrower: a member holding up to `MAX_BOOKS` books

pub mod book;
pub mod borrower;

pub use book::{Book, BookField, Genre, InvalidGenre};
pub use borrower::{Borrower, BorrowerField, MAX_BOOKS};
