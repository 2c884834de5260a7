//! Focus ring for the search controls.
//!
//! The pane has no pointer, so the controls of the search view are visited in a
//! fixed ring with Tab / Shift+Tab. The focused control decides how typed
//! characters and arrow keys are interpreted.
//!
//! ```text
//! Query → Author → Language → Year → Results → Query …
//! ```

/// The control that currently receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Free-text title query. Enter runs the search.
    #[default]
    Query,

    /// Author substring filter.
    AuthorFilter,

    /// Language selector. Left/Right/Space cycle the options.
    LanguageFilter,

    /// Year substring filter.
    YearFilter,

    /// Result list. j/k move the selection.
    Results,
}

impl Focus {
    const RING: [Self; 5] = [
        Self::Query,
        Self::AuthorFilter,
        Self::LanguageFilter,
        Self::YearFilter,
        Self::Results,
    ];

    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::RING.iter().position(|f| *f == self).unwrap_or(0);
        Self::RING[(idx + 1) % Self::RING.len()]
    }

    #[must_use]
    pub fn previous(self) -> Self {
        let idx = Self::RING.iter().position(|f| *f == self).unwrap_or(0);
        Self::RING[(idx + Self::RING.len() - 1) % Self::RING.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_wraps_in_both_directions() {
        assert_eq!(Focus::Results.next(), Focus::Query);
        assert_eq!(Focus::Query.previous(), Focus::Results);
        assert_eq!(Focus::AuthorFilter.next(), Focus::LanguageFilter);
    }
}
