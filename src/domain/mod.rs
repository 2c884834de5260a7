//! Domain layer for the BookFinder plugin.
//!
//! Core types and pure logic, independent of Zellij APIs and of the Open Library
//! wire format.
//!
//! # Organization
//!
//! - [`book`]: Normalized book record and display sentinels
//! - [`filter`]: Author/language/year filter evaluation
//! - [`error`]: Error types and result alias
//!
//! # Examples
//!
//! ```
//! use bookfinder::domain::{filter_books, BookFilter, BookRecord, PublishYear};
//!
//! let books = vec![BookRecord {
//!     id: "/works/OL1W".to_string(),
//!     title: "Algorithms".to_string(),
//!     author_display: "Robert Sedgewick".to_string(),
//!     first_publish_year: PublishYear::Year(1983),
//!     language_display: "eng".to_string(),
//!     cover_image_id: None,
//! }];
//!
//! let filter = BookFilter { author: "sedge".to_string(), ..Default::default() };
//! assert_eq!(filter_books(&books, &filter).len(), 1);
//! ```

pub mod book;
pub mod error;
pub mod filter;

pub use book::{BookRecord, PublishYear, NOT_AVAILABLE, UNKNOWN_AUTHOR};
pub use error::{BookFinderError, Result};
pub use filter::{filter_books, BookFilter, LanguageFilter};
