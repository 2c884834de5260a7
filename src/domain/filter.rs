//! Local filter evaluation over the accumulated result list.
//!
//! Filtering is a pure function of the result list and the three filter inputs.
//! It is recomputed on every read of the filtered view; nothing here is cached.

use super::book::BookRecord;

/// Language options offered by the language control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageFilter {
    #[default]
    Any,
    Eng,
    Fre,
    Hin,
    Ger,
}

impl LanguageFilter {
    /// All options in the order the control cycles through them.
    pub const ALL: [Self; 5] = [Self::Any, Self::Eng, Self::Fre, Self::Hin, Self::Ger];

    /// The Open Library language code, or `"any"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Eng => "eng",
            Self::Fre => "fre",
            Self::Hin => "hin",
            Self::Ger => "ger",
        }
    }

    /// Human-readable label for the control.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Any => "All Languages",
            Self::Eng => "English",
            Self::Fre => "French",
            Self::Hin => "Hindi",
            Self::Ger => "German",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// The three filter inputs as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookFilter {
    pub author: String,
    pub language: LanguageFilter,
    pub year: String,
}

impl BookFilter {
    /// Returns `true` when every filter is at its neutral value.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.author.is_empty() && self.language == LanguageFilter::Any && self.year.is_empty()
    }

    /// Returns `true` if `book` passes the author, language and year predicates.
    #[must_use]
    pub fn matches(&self, book: &BookRecord) -> bool {
        self.matches_author(book) && self.matches_language(book) && self.matches_year(book)
    }

    fn matches_author(&self, book: &BookRecord) -> bool {
        self.author.is_empty()
            || book
                .author_display
                .to_lowercase()
                .contains(&self.author.to_lowercase())
    }

    fn matches_language(&self, book: &BookRecord) -> bool {
        match self.language {
            LanguageFilter::Any => true,
            lang => book.language_display.to_lowercase().contains(lang.code()),
        }
    }

    fn matches_year(&self, book: &BookRecord) -> bool {
        self.year.is_empty() || book.first_publish_year.to_string().contains(&self.year)
    }
}

/// Narrows `books` to the records passing `filter`, preserving order.
#[must_use]
pub fn filter_books<'a>(books: &'a [BookRecord], filter: &BookFilter) -> Vec<&'a BookRecord> {
    let _span = tracing::trace_span!(
        "filter_books",
        total = books.len(),
        neutral = filter.is_neutral()
    )
    .entered();

    books.iter().filter(|book| filter.matches(book)).collect()
}
