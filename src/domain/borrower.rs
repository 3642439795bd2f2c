//! Borrowers and their bounded list of borrowed books.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::util::criteria::{Record, SearchField, UnknownField};

/// Maximum number of books a borrower can hold at once
pub const MAX_BOOKS: usize = 3;

/// A library member who can borrow books
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borrower {
    /// Unique identifier (`BORROWER_0001`)
    pub borrower_id: String,

    pub name: String,

    pub email: String,

    /// Book IDs currently held, in borrowing order
    #[serde(default)]
    borrowed_books: Vec<String>,
}

impl Borrower {
    /// Create a borrower holding no books
    pub fn new(
        borrower_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            borrower_id: borrower_id.into(),
            name: name.into(),
            email: email.into(),
            borrowed_books: Vec::new(),
        }
    }

    /// Book IDs currently held
    pub fn borrowed_books(&self) -> &[String] {
        &self.borrowed_books
    }

    /// Whether the borrower is below the limit
    pub fn can_borrow(&self) -> bool {
        self.borrowed_books.len() < MAX_BOOKS
    }

    pub fn has_book(&self, book_id: &str) -> bool {
        self.borrowed_books.iter().any(|id| id == book_id)
    }

    /// Add a book to the borrowed list. Returns false at the limit.
    pub fn borrow_book(&mut self, book_id: impl Into<String>) -> bool {
        if !self.can_borrow() {
            return false;
        }
        self.borrowed_books.push(book_id.into());
        true
    }

    /// Remove the first occurrence of a book. Returns false if not held.
    pub fn return_book(&mut self, book_id: &str) -> bool {
        match self.borrowed_books.iter().position(|id| id == book_id) {
            Some(pos) => {
                self.borrowed_books.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Convert to a plain record (`borrower_id, name, email, borrowed_books`)
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("borrower_id".into(), Value::from(self.borrower_id.as_str()));
        record.insert("name".into(), Value::from(self.name.as_str()));
        record.insert("email".into(), Value::from(self.email.as_str()));
        record.insert(
            "borrowed_books".into(),
            Value::from(self.borrowed_books.clone()),
        );
        record
    }

    /// Rebuild a borrower from a plain record
    pub fn from_record(record: &Record) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(record.clone()))
    }
}

impl fmt::Display for Borrower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} <{}> - {}/{} books",
            self.borrower_id,
            self.name,
            self.email,
            self.borrowed_books.len(),
            MAX_BOOKS
        )
    }
}

/// Searchable borrower fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowerField {
    BorrowerId,
    Name,
    Email,
}

impl SearchField for BorrowerField {
    fn key(&self) -> &'static str {
        match self {
            BorrowerField::BorrowerId => "borrower_id",
            BorrowerField::Name => "name",
            BorrowerField::Email => "email",
        }
    }
}

impl FromStr for BorrowerField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "borrower_id" | "id" => Ok(BorrowerField::BorrowerId),
            "name" => Ok(BorrowerField::Name),
            "email" => Ok(BorrowerField::Email),
            _ => Err(UnknownField {
                field: s.to_string(),
                expected: "borrower_id, name, email",
            }),
        }
    }
}
