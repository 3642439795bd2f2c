//! Command-line interface for shelf.
//!
//! Provides commands for adding books and borrowers, checking books out and
//! back in, searching the catalog, and reporting statistics.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::LibraryConfig;
use crate::domain::{Book, BookField, Genre};
use crate::library::Library;
use crate::util::{format_date, Criteria};

/// shelf - library catalog manager
#[derive(Parser, Debug)]
#[command(name = "shelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the library documents
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book to the catalog
    AddBook {
        title: String,

        author: String,

        /// One of: Fiction, Non-Fiction, Science, History, Technology
        genre: String,
    },

    /// Register a borrower
    AddBorrower { name: String, email: String },

    /// Check a book out to a borrower
    Checkout { book_id: String, borrower_id: String },

    /// Return a borrowed book
    Return { book_id: String, borrower_id: String },

    /// Search books by exact field values (case-insensitive for text)
    Search {
        #[arg(long)]
        id: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        genre: Option<Genre>,

        #[arg(long)]
        available: Option<bool>,

        /// Extra constraint as field=value (repeatable)
        #[arg(long = "where", value_name = "FIELD=VALUE")]
        conditions: Vec<String>,
    },

    /// List all books
    Books,

    /// List available books
    Available,

    /// List registered borrowers
    Borrowers,

    /// List the books a borrower holds
    Borrowed { borrower_id: String },

    /// Show library statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let config = LibraryConfig::load(self.data_dir)?;

        // Config must stay readable even when the documents are not
        if let Commands::Config = self.command {
            return show_config(&config);
        }

        let mut library = Library::open(config).context("Failed to open library")?;

        match self.command {
            Commands::AddBook {
                title,
                author,
                genre,
            } => {
                let book = library.add_book(&title, &author, &genre)?;
                println!("Added {}", book);
            }
            Commands::AddBorrower { name, email } => {
                let borrower = library.add_borrower(&name, &email)?;
                println!("Registered {}", borrower);
            }
            Commands::Checkout {
                book_id,
                borrower_id,
            } => {
                if !library.checkout_book(&book_id, &borrower_id)? {
                    anyhow::bail!(
                        "Cannot check out {} to {}: book unavailable, unknown ID, or borrower at limit",
                        book_id,
                        borrower_id
                    );
                }
                println!("{} checked out to {}", book_id, borrower_id);
            }
            Commands::Return {
                book_id,
                borrower_id,
            } => {
                if !library.return_book(&book_id, &borrower_id)? {
                    anyhow::bail!(
                        "Cannot return {} from {}: not borrowed by this borrower",
                        book_id,
                        borrower_id
                    );
                }
                println!("{} returned by {}", book_id, borrower_id);
            }
            Commands::Search {
                id,
                title,
                author,
                genre,
                available,
                conditions,
            } => {
                let mut criteria = Criteria::new();
                if let Some(id) = id {
                    criteria.push(BookField::BookId, id);
                }
                if let Some(title) = title {
                    criteria.push(BookField::Title, title);
                }
                if let Some(author) = author {
                    criteria.push(BookField::Author, author);
                }
                if let Some(genre) = genre {
                    criteria.push(BookField::Genre, genre.as_str());
                }
                if let Some(available) = available {
                    criteria.push(BookField::Available, available);
                }
                for condition in &conditions {
                    let (field, value) = parse_condition(condition)?;
                    criteria.push(field, value);
                }

                let results = library.search_books(&criteria);
                if results.is_empty() {
                    println!("No matching books");
                } else {
                    println!("Found {} book(s):\n", results.len());
                    print_books(&results);
                }
            }
            Commands::Books => {
                let books: Vec<&Book> = library.books().collect();
                if books.is_empty() {
                    println!("Library is empty. Use 'shelf add-book' to add books.");
                } else {
                    print_books(&books);
                    println!("\nTotal: {} books", books.len());
                }
            }
            Commands::Available => {
                let books = library.get_available_books();
                if books.is_empty() {
                    println!("No books available");
                } else {
                    print_books(&books);
                }
            }
            Commands::Borrowers => {
                let mut any = false;
                for borrower in library.borrowers() {
                    println!("{}", borrower);
                    any = true;
                }
                if !any {
                    println!("No borrowers registered");
                }
            }
            Commands::Borrowed { borrower_id } => {
                let borrower = library
                    .borrower(&borrower_id)
                    .ok_or_else(|| anyhow::anyhow!("Borrower not found: {}", borrower_id))?;
                println!("{}", borrower);

                let books = library.get_borrower_books(&borrower_id);
                if books.is_empty() {
                    println!("  (no books)");
                }
                for book in books {
                    println!("  {}", book);
                }
            }
            Commands::Stats { json } => {
                let stats = library.get_statistics();
                if json {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                } else {
                    println!("{} statistics as of {}", library.name(), format_date(None));
                    println!();
                    println!("  Total books:     {}", stats.total_books);
                    println!("  Available:       {}", stats.available_books);
                    println!("  Checked out:     {}", stats.checked_out);
                    println!("  Borrowers:       {}", stats.total_borrowers);
                    println!();
                    println!("Books by genre:");
                    for (genre, count) in &stats.books_by_genre {
                        println!("  {:<12} {}", genre.as_str(), count);
                    }
                }
            }
            Commands::Config => show_config(library.config())?,
        }

        Ok(())
    }
}

/// Parse `field=value` into a typed book criterion
fn parse_condition(condition: &str) -> Result<(BookField, serde_json::Value)> {
    let (field, raw) = condition
        .split_once('=')
        .with_context(|| format!("Expected FIELD=VALUE, got '{}'", condition))?;

    let field: BookField = field.trim().parse()?;
    let value = field.parse_value(raw.trim()).map_err(anyhow::Error::msg)?;
    Ok((field, value))
}

fn print_books(books: &[&Book]) {
    println!(
        "{:<12} {:<32} {:<20} {:<12} {:<12}",
        "ID", "TITLE", "AUTHOR", "GENRE", "STATUS"
    );
    println!("{}", "-".repeat(92));

    for book in books {
        println!(
            "{:<12} {:<32} {:<20} {:<12} {:<12}",
            book.book_id,
            truncate(&book.title, 32),
            truncate(&book.author, 20),
            book.genre.as_str(),
            book.status()
        );
    }
}

/// Shorten to `max` characters, marking the cut with "..."
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

/// Show the resolved configuration (for debugging)
fn show_config(config: &LibraryConfig) -> Result<()> {
    println!("Shelf Configuration");
    println!();
    println!(
        "Config file: {}",
        config
            .config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!("Library name: {}", config.name);
    println!();
    println!("Paths:");
    println!("  Data directory: {}", config.data_dir.display());
    println!("  Books:          {}", config.books_path().display());
    println!("  Borrowers:      {}", config.borrowers_path().display());

    Ok(())
}
