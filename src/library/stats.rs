//! Summary counts over the catalog.

use indexmap::IndexMap;
use serde::Serialize;

use crate::domain::{Book, Genre};

/// Library statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub total_books: usize,
    pub available_books: usize,
    pub checked_out: usize,
    pub total_borrowers: usize,
    /// Count per genre, with every genre present in canonical order
    pub books_by_genre: IndexMap<Genre, usize>,
}

impl LibraryStats {
    /// Tally books and borrowers
    pub fn collect<'a>(books: impl IntoIterator<Item = &'a Book>, total_borrowers: usize) -> Self {
        let mut books_by_genre: IndexMap<Genre, usize> =
            Genre::ALL.into_iter().map(|genre| (genre, 0)).collect();
        let mut total_books = 0;
        let mut available_books = 0;

        for book in books {
            total_books += 1;
            if book.available {
                available_books += 1;
            }
            *books_by_genre.entry(book.genre).or_insert(0) += 1;
        }

        Self {
            total_books,
            available_books,
            checked_out: total_books - available_books,
            total_borrowers,
            books_by_genre,
        }
    }

    /// Count for one genre
    pub fn genre_count(&self, genre: Genre) -> usize {
        self.books_by_genre.get(&genre).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_stats_list_every_genre() {
        let books: Vec<Book> = Vec::new();
        let stats = LibraryStats::collect(&books, 0);

        assert_eq!(stats.total_books, 0);
        assert_eq!(stats.checked_out, 0);
        assert_eq!(stats.books_by_genre.len(), Genre::ALL.len());
        assert!(stats.books_by_genre.values().all(|&count| count == 0));
        assert_eq!(
            stats.books_by_genre.keys().copied().collect::<Vec<_>>(),
            Genre::ALL.to_vec()
        );
    }

    #[test]
    fn test_stats_serialize_with_genre_names() {
        let mut checked_out = Book::new("BOOK_0002", "B", "Y", Genre::Fiction);
        checked_out.available = false;
        let books = [
            Book::new("BOOK_0001", "A", "X", Genre::Fiction),
            checked_out,
            Book::new("BOOK_0003", "C", "Z", Genre::Science),
        ];

        let stats = LibraryStats::collect(&books, 0);
        assert_eq!(stats.genre_count(Genre::Fiction), 2);
        assert_eq!(stats.genre_count(Genre::NonFiction), 0);

        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            json!({
                "total_books": 3,
                "available_books": 2,
                "checked_out": 1,
                "total_borrowers": 0,
                "books_by_genre": {
                    "Fiction": 2,
                    "Non-Fiction": 0,
                    "Science": 1,
                    "History": 0,
                    "Technology": 0
                }
            })
        );
    }
}
