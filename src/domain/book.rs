//! Books and the fixed genre set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::util::criteria::{Record, SearchField, UnknownField};

/// Genre outside the fixed set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid genre '{0}'. Must be one of: Fiction, Non-Fiction, Science, History, Technology")]
pub struct InvalidGenre(pub String);

/// Book genre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Genre {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    Science,
    History,
    Technology,
}

impl Genre {
    /// Every genre, in canonical order
    pub const ALL: [Genre; 5] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::Science,
        Genre::History,
        Genre::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::Science => "Science",
            Genre::History => "History",
            Genre::Technology => "Technology",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Genre {
    type Err = InvalidGenre;

    /// Genre names are matched exactly, as they are stored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|genre| genre.as_str() == s)
            .ok_or_else(|| InvalidGenre(s.to_string()))
    }
}

impl TryFrom<String> for Genre {
    type Error = InvalidGenre;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A book in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier (`BOOK_0001`)
    pub book_id: String,

    pub title: String,

    pub author: String,

    pub genre: Genre,

    /// Whether the book can be checked out
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Book {
    /// Create an available book
    pub fn new(
        book_id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: Genre,
    ) -> Self {
        Self {
            book_id: book_id.into(),
            title: title.into(),
            author: author.into(),
            genre,
            available: true,
        }
    }

    /// Create a book from an unvalidated genre name
    pub fn with_genre_name(
        book_id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: &str,
    ) -> Result<Self, InvalidGenre> {
        Ok(Self::new(book_id, title, author, genre.parse()?))
    }

    /// Status label shown to users
    pub fn status(&self) -> &'static str {
        if self.available {
            "Available"
        } else {
            "Checked Out"
        }
    }

    /// Convert to a plain record (`book_id, title, author, genre, available`)
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("book_id".into(), Value::from(self.book_id.as_str()));
        record.insert("title".into(), Value::from(self.title.as_str()));
        record.insert("author".into(), Value::from(self.author.as_str()));
        record.insert("genre".into(), Value::from(self.genre.as_str()));
        record.insert("available".into(), Value::from(self.available));
        record
    }

    /// Rebuild a book from a plain record
    pub fn from_record(record: &Record) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(record.clone()))
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} by {} ({}) - {}",
            self.book_id,
            self.title,
            self.author,
            self.genre,
            self.status()
        )
    }
}

/// Searchable book fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    BookId,
    Title,
    Author,
    Genre,
    Available,
}

impl SearchField for BookField {
    fn key(&self) -> &'static str {
        match self {
            BookField::BookId => "book_id",
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::Genre => "genre",
            BookField::Available => "available",
        }
    }
}

impl FromStr for BookField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "book_id" | "id" => Ok(BookField::BookId),
            "title" => Ok(BookField::Title),
            "author" => Ok(BookField::Author),
            "genre" => Ok(BookField::Genre),
            "available" => Ok(BookField::Available),
            _ => Err(UnknownField {
                field: s.to_string(),
                expected: "book_id, title, author, genre, available",
            }),
        }
    }
}

impl BookField {
    /// Typed criteria value for a raw string (`available` takes a bool)
    pub fn parse_value(&self, raw: &str) -> Result<Value, String> {
        match self {
            BookField::Available => raw
                .parse::<bool>()
                .map(Value::from)
                .map_err(|_| format!("Expected true or false for 'available', got '{}'", raw)),
            _ => Ok(Value::from(raw)),
        }
    }
}
