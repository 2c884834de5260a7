//! Normalized book model.
//!
//! A [`BookRecord`] is the fixed-shape display row derived from one raw search
//! result. Every field is display-ready: missing authors, years and languages are
//! already replaced by their sentinels, so rendering and filtering never deal with
//! absent data.

use std::fmt;

/// Author text shown when a record has no author names.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Sentinel shown for a missing year or language list.
pub const NOT_AVAILABLE: &str = "N/A";

/// First publication year of a book, or the `N/A` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishYear {
    Year(i64),
    Unknown,
}

impl PublishYear {
    /// Builds a year from the raw API value.
    ///
    /// A zero year is treated like a missing one.
    #[must_use]
    pub const fn from_raw(raw: Option<i64>) -> Self {
        match raw {
            Some(year) if year != 0 => Self::Year(year),
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for PublishYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year}"),
            Self::Unknown => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// One normalized search result.
///
/// `id` is the Open Library work key. It is unique within a single page but the
/// accumulated result list may hold duplicates when pages overlap upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub author_display: String,
    pub first_publish_year: PublishYear,
    pub language_display: String,
    pub cover_image_id: Option<i64>,
}

impl BookRecord {
    /// Joins author names for display, falling back to [`UNKNOWN_AUTHOR`].
    #[must_use]
    pub fn author_text(names: Option<&[String]>) -> String {
        match names {
            Some(names) if !names.is_empty() => names.join(", "),
            _ => UNKNOWN_AUTHOR.to_string(),
        }
    }

    /// Joins language codes for display, falling back to [`NOT_AVAILABLE`].
    #[must_use]
    pub fn language_text(codes: Option<&[String]>) -> String {
        match codes {
            Some(codes) if !codes.is_empty() => codes.join(", "),
            _ => NOT_AVAILABLE.to_string(),
        }
    }
}
