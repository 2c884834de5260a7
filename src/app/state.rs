//! Search view state and view model computation.
//!
//! [`AppState`] is the single source of truth for the search view: the query and
//! filter inputs, the accumulated result list, pagination, loading and error
//! flags, and the theme. It is owned by the plugin and mutated only by the event
//! handler.
//!
//! # Searching
//!
//! A search is split around the fetch boundary:
//!
//! 1. [`AppState::begin_search`] sets the loading flag, clears the error, bumps
//!    the request generation and returns the [`SearchRequest`] to issue.
//! 2. [`AppState::finish_search`] applies the completed page (or the failure)
//!    and clears the loading flag.
//!
//! Only the most recently issued request is applied. Completions of superseded
//! requests are dropped, so overlapping searches can never interleave their pages.
//!
//! # Derived State
//!
//! The filtered result list is never stored. [`AppState::filtered_books`]
//! recomputes it from the result list and the filter inputs on every call.

use super::modes::Focus;
use crate::domain::{filter_books, BookFilter, BookFinderError, BookRecord, Result};
use crate::openlibrary::{self, SearchRequest, BOOTSTRAP_QUERY, PAGE_SIZE};
use crate::ui::helpers::truncate;
use crate::ui::theme::{Theme, ThemePair};
use crate::ui::viewmodel::{
    ControlField, ControlsInfo, DetailInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo,
    StatusLine, UIViewModel,
};

/// Rows taken by everything except the result table.
pub const CHROME_ROWS: usize = 13;

pub const YEAR_COLUMN_WIDTH: usize = 6;
pub const LANGUAGE_COLUMN_WIDTH: usize = 14;
pub const AUTHOR_COLUMN_WIDTH: usize = 28;
const MIN_TITLE_COLUMN_WIDTH: usize = 12;

/// Central search view state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Text in the query input.
    pub query_text: String,

    /// Accumulated results, in arrival order.
    ///
    /// Replaced by a new search, extended by "load more". Never reordered or
    /// deduplicated.
    pub results: Vec<BookRecord>,

    pub is_loading: bool,

    /// Human-readable message of the last failed search, if any.
    pub error_message: Option<String>,

    pub is_dark_theme: bool,

    /// Author, language and year filter inputs.
    pub filter: BookFilter,

    /// Page number of the last applied page (one-based).
    pub current_page: u32,

    /// Whether the last applied page was full.
    pub has_more_pages: bool,

    /// Control receiving keyboard input.
    pub focus: Focus,

    /// Selected row within the filtered results.
    pub selected_index: usize,

    pub themes: ThemePair,

    /// The host refused `WebAccess`; searches fail without being issued.
    pub web_access_denied: bool,

    /// Generation of the most recently issued request.
    latest_generation: u64,
}

impl AppState {
    /// Creates an empty search view with the given themes.
    #[must_use]
    pub fn new(themes: ThemePair, is_dark_theme: bool) -> Self {
        Self {
            query_text: String::new(),
            results: Vec::new(),
            is_loading: false,
            error_message: None,
            is_dark_theme,
            filter: BookFilter::default(),
            current_page: 1,
            has_more_pages: false,
            focus: Focus::default(),
            selected_index: 0,
            themes,
            web_access_denied: false,
            latest_generation: 0,
        }
    }

    /// The theme matching the current light/dark setting.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        self.themes.select(self.is_dark_theme)
    }

    pub fn toggle_theme(&mut self) {
        self.is_dark_theme = !self.is_dark_theme;
        tracing::debug!(dark = self.is_dark_theme, "theme toggled");
    }

    /// Starts a search for `search_term` and returns the request to issue.
    ///
    /// The term is trimmed and falls back to the default query when empty. Loading
    /// is flagged and any previous error cleared. Any request still in flight is
    /// superseded.
    pub fn begin_search(&mut self, search_term: &str, page: u32, append: bool) -> SearchRequest {
        let query = openlibrary::effective_query(search_term);

        self.latest_generation += 1;
        self.is_loading = true;
        self.error_message = None;

        tracing::debug!(
            generation = self.latest_generation,
            query = %query,
            page = page,
            append = append,
            "search started"
        );

        SearchRequest::new(self.latest_generation, query, page, append)
    }

    /// Starts the default search run on mount and by "Clear".
    ///
    /// Filter inputs and the query text are left as they are.
    pub fn begin_bootstrap_search(&mut self) -> SearchRequest {
        self.begin_search(BOOTSTRAP_QUERY, 1, false)
    }

    /// Whether "load more" is currently offered.
    #[must_use]
    pub const fn can_load_more(&self) -> bool {
        self.has_more_pages && !self.is_loading
    }

    /// Starts a fetch of the page after the current one for the query text,
    /// appending to the results.
    ///
    /// Returns `None` when "load more" is not offered.
    pub fn begin_load_more(&mut self) -> Option<SearchRequest> {
        if !self.can_load_more() {
            tracing::debug!(
                has_more_pages = self.has_more_pages,
                is_loading = self.is_loading,
                "load more not available"
            );
            return None;
        }

        let term = self.query_text.clone();
        let next_page = self.current_page + 1;
        Some(self.begin_search(&term, next_page, true))
    }

    /// Returns `true` if `request` is the most recently issued one.
    #[must_use]
    pub const fn is_current(&self, request: &SearchRequest) -> bool {
        request.generation == self.latest_generation
    }

    /// Applies the outcome of a completed request.
    ///
    /// On success the page replaces or extends the results, `has_more_pages`
    /// records whether the page was full, and `current_page` becomes the request's
    /// page. On failure the results are left untouched and the error message is
    /// set. The loading flag is cleared either way.
    ///
    /// Returns `false` without touching any state if `request` was superseded.
    pub fn finish_search(&mut self, request: &SearchRequest, outcome: Result<Vec<BookRecord>>) -> bool {
        if !self.is_current(request) {
            tracing::debug!(
                generation = request.generation,
                latest_generation = self.latest_generation,
                "dropping superseded search result"
            );
            return false;
        }

        match outcome {
            Ok(books) => {
                let received = books.len();
                self.has_more_pages = received == PAGE_SIZE;
                self.current_page = request.page;

                if request.append {
                    self.results.extend(books);
                } else {
                    self.results = books;
                    self.selected_index = 0;
                }

                tracing::debug!(
                    received = received,
                    total = self.results.len(),
                    page = self.current_page,
                    has_more_pages = self.has_more_pages,
                    "search page applied"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, query = %request.query, page = request.page, "search failed");
                self.error_message = Some(e.to_string());
            }
        }

        self.is_loading = false;
        self.clamp_selection();
        true
    }

    /// Clears the loading flag for a completion that could not be matched to its
    /// request.
    ///
    /// `generation` is whatever could still be read from the context map. A
    /// known stale generation is dropped like in [`Self::finish_search`].
    pub fn abandon_search(&mut self, generation: Option<u64>, error: &BookFinderError) -> bool {
        if generation.is_some_and(|g| g != self.latest_generation) || !self.is_loading {
            tracing::debug!(generation = ?generation, "ignoring unreadable stale completion");
            return false;
        }

        tracing::warn!(error = %error, "search abandoned");
        self.error_message = Some(error.to_string());
        self.is_loading = false;
        true
    }

    /// Records that web access was refused. Any in-flight search is abandoned.
    pub fn deny_web_access(&mut self) {
        self.web_access_denied = true;
        self.is_loading = false;
        self.error_message = Some(BookFinderError::WebAccessDenied.to_string());
    }

    /// The results passing the current filters, in result order.
    #[must_use]
    pub fn filtered_books(&self) -> Vec<&BookRecord> {
        filter_books(&self.results, &self.filter)
    }

    /// The selected book within the filtered results, if any.
    #[must_use]
    pub fn selected_book(&self) -> Option<&BookRecord> {
        let filtered = self.filtered_books();
        let index = self.selected_index.min(filtered.len().saturating_sub(1));
        filtered.get(index).copied()
    }

    /// Moves the selection down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.filtered_books().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the selection up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.filtered_books().len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index = self.selected_index.min(len) - 1;
        }
    }

    /// Keeps the selection inside the filtered results after they changed.
    pub fn clamp_selection(&mut self) {
        let len = self.filtered_books().len();
        self.selected_index = if len == 0 {
            0
        } else {
            self.selected_index.min(len - 1)
        };
    }

    /// Computes a renderable view model for a pane of `rows` × `cols`.
    ///
    /// The result table shows a window of the filtered results centered on the
    /// selection.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let filtered = self.filtered_books();
        let selected = self.selected_index.min(filtered.len().saturating_sub(1));

        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);
        let mut visible_start = selected.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(filtered.len());
        if visible_end - visible_start < available_rows && filtered.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let display_items = filtered[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, book)| {
                self.compute_display_item(book, visible_start + relative_idx == selected, cols)
            })
            .collect();

        let detail = self.selected_book().map(|book| DetailInfo {
            id: book.id.clone(),
            cover_url: openlibrary::cover_url(book.cover_image_id),
        });

        UIViewModel {
            header: self.compute_header(filtered.len()),
            controls: self.compute_controls(),
            status: self.compute_status(),
            display_items,
            selected_index: selected.saturating_sub(visible_start),
            empty_state: self.compute_empty_state(filtered.len()),
            detail,
            footer: self.compute_footer(),
        }
    }

    fn compute_display_item(&self, book: &BookRecord, is_selected: bool, cols: usize) -> DisplayItem {
        let title_width = Self::title_column_width(cols);
        let author = truncate(&book.author_display, AUTHOR_COLUMN_WIDTH - 2);
        let highlight_ranges = self.author_highlight_ranges(&author);

        DisplayItem {
            title: truncate(&book.title, title_width.saturating_sub(2)),
            author,
            year: book.first_publish_year.to_string(),
            language: truncate(&book.language_display, LANGUAGE_COLUMN_WIDTH - 2),
            is_selected,
            highlight_ranges,
        }
    }

    /// Width of the title column once the fixed columns are laid out.
    #[must_use]
    pub const fn title_column_width(cols: usize) -> usize {
        let fixed = AUTHOR_COLUMN_WIDTH + YEAR_COLUMN_WIDTH + LANGUAGE_COLUMN_WIDTH;
        let remaining = cols.saturating_sub(fixed);
        if remaining < MIN_TITLE_COLUMN_WIDTH {
            MIN_TITLE_COLUMN_WIDTH
        } else {
            remaining
        }
    }

    /// Character ranges of every occurrence of the author filter in `author`.
    fn author_highlight_ranges(&self, author: &str) -> Vec<(usize, usize)> {
        let needle = self.filter.author.to_lowercase();
        if needle.is_empty() {
            return vec![];
        }

        let haystack = author.to_lowercase();
        // Lowercasing may change the character count; char indices would not line up.
        if haystack.chars().count() != author.chars().count() {
            return vec![];
        }

        let needle_chars = needle.chars().count();
        haystack
            .match_indices(&needle)
            .map(|(byte_idx, _)| {
                let start = haystack[..byte_idx].chars().count();
                (start, start + needle_chars)
            })
            .collect()
    }

    fn compute_header(&self, shown: usize) -> HeaderInfo {
        HeaderInfo {
            title: format!(
                " BookFinder ({shown} of {total}, page {page}) ",
                total = self.results.len(),
                page = self.current_page
            ),
            subtitle: "Search Open Library by title".to_string(),
        }
    }

    fn compute_controls(&self) -> ControlsInfo {
        ControlsInfo {
            query: ControlField {
                label: "Search",
                value: self.query_text.clone(),
                focused: self.focus == Focus::Query,
            },
            author: ControlField {
                label: "Author",
                value: self.filter.author.clone(),
                focused: self.focus == Focus::AuthorFilter,
            },
            language: ControlField {
                label: "Language",
                value: self.filter.language.label().to_string(),
                focused: self.focus == Focus::LanguageFilter,
            },
            year: ControlField {
                label: "Year",
                value: self.filter.year.clone(),
                focused: self.focus == Focus::YearFilter,
            },
        }
    }

    fn compute_status(&self) -> Option<StatusLine> {
        if self.is_loading {
            Some(StatusLine::Loading)
        } else {
            self.error_message.clone().map(StatusLine::Error)
        }
    }

    fn compute_empty_state(&self, shown: usize) -> Option<EmptyState> {
        if shown > 0 || self.is_loading {
            return None;
        }

        Some(if self.results.is_empty() {
            EmptyState {
                message: "No books found".to_string(),
                subtitle: if self.web_access_denied {
                    "Reload the plugin and grant web access to search".to_string()
                } else {
                    "Type a title and press Enter to search".to_string()
                },
            }
        } else {
            EmptyState {
                message: "No books match the filters".to_string(),
                subtitle: "Adjust the author, language or year filter".to_string(),
            }
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let focus_keys = match self.focus {
            Focus::Query => "Enter: search",
            Focus::AuthorFilter | Focus::YearFilter => "Type to filter  Enter: search",
            Focus::LanguageFilter => "←/→: language  Enter: search",
            Focus::Results => "j/k: select  Enter: search",
        };
        let mode = if self.is_dark_theme { "Light Mode" } else { "Dark Mode" };

        FooterInfo {
            keybindings: format!(
                "Tab: next field  {focus_keys}  Ctrl+r: clear  Ctrl+t: {mode}  Esc: hide"
            ),
            load_more: self.can_load_more(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookFinderError, LanguageFilter, PublishYear};

    fn state() -> AppState {
        AppState::new(ThemePair::default(), false)
    }

    fn page(prefix: &str, count: usize) -> Vec<BookRecord> {
        (0..count)
            .map(|i| BookRecord {
                id: format!("/works/{prefix}{i}"),
                title: format!("{prefix} book {i}"),
                author_display: if i % 2 == 0 { "Ada Lovelace".into() } else { "Alan Turing".into() },
                first_publish_year: PublishYear::Year(1950 + i as i64),
                language_display: if i % 3 == 0 { "fre".into() } else { "eng".into() },
                cover_image_id: Some(i as i64),
            })
            .collect()
    }

    #[test]
    fn begin_search_flags_loading_and_clears_error() {
        let mut state = state();
        state.error_message = Some("old".into());

        let request = state.begin_search("  Data Structures ", 1, false);

        assert!(state.is_loading);
        assert!(state.error_message.is_none());
        assert_eq!(request.query, "Data Structures");
        assert_eq!(request.page, 1);
        assert!(!request.append);
    }

    #[test]
    fn full_page_means_more_pages() {
        let mut state = state();
        let request = state.begin_search("Data Structures", 1, false);

        assert!(state.finish_search(&request, Ok(page("a", PAGE_SIZE))));

        assert!(state.has_more_pages);
        assert_eq!(state.current_page, 1);
        assert!(!state.is_loading);
        assert_eq!(state.results.len(), PAGE_SIZE);
    }

    #[test]
    fn short_page_means_last_page() {
        let mut state = state();
        let request = state.begin_search("rare", 1, false);
        state.finish_search(&request, Ok(page("a", 49)));

        assert!(!state.has_more_pages);
        assert!(!state.can_load_more());
    }

    #[test]
    fn append_extends_in_order() {
        let mut state = state();
        let first = state.begin_search("rust", 1, false);
        state.finish_search(&first, Ok(page("a", PAGE_SIZE)));

        state.query_text = "rust".into();
        let second = state.begin_load_more().unwrap();
        assert_eq!(second.page, 2);
        assert!(second.append);
        state.finish_search(&second, Ok(page("b", 10)));

        assert_eq!(state.results.len(), PAGE_SIZE + 10);
        assert_eq!(state.results[0].id, "/works/a0");
        assert_eq!(state.results[PAGE_SIZE].id, "/works/b0");
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn failure_keeps_results_and_sets_message() {
        let mut state = state();
        let first = state.begin_search("rust", 1, false);
        state.finish_search(&first, Ok(page("a", 5)));

        let second = state.begin_search("rust", 1, false);
        state.finish_search(&second, Err(BookFinderError::RemoteFetch { status: 503 }));

        assert_eq!(state.results.len(), 5);
        assert_eq!(
            state.error_message.as_deref(),
            Some("Failed to fetch from Open Library API")
        );
        assert!(!state.is_loading);
    }

    #[test]
    fn superseded_result_is_dropped() {
        let mut state = state();
        let stale = state.begin_search("first", 1, false);
        let latest = state.begin_search("second", 1, false);

        assert!(!state.finish_search(&stale, Ok(page("stale", 3))));
        assert!(state.results.is_empty());
        assert!(state.is_loading);

        assert!(state.finish_search(&latest, Ok(page("fresh", 2))));
        assert_eq!(state.results[0].id, "/works/fresh0");
        assert!(!state.is_loading);
    }

    #[test]
    fn load_more_refused_while_loading() {
        let mut state = state();
        let request = state.begin_search("rust", 1, false);
        state.finish_search(&request, Ok(page("a", PAGE_SIZE)));

        let _pending = state.begin_search("rust", 1, false);
        assert!(state.begin_load_more().is_none());
    }

    #[test]
    fn selection_wraps_over_filtered_results() {
        let mut state = state();
        let request = state.begin_search("rust", 1, false);
        state.finish_search(&request, Ok(page("a", 6)));
        state.filter.language = LanguageFilter::Fre;

        assert_eq!(state.filtered_books().len(), 2);
        state.move_selection_up();
        assert_eq!(state.selected_index, 1);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.selected_book().unwrap().id, "/works/a0");
    }

    #[test]
    fn viewmodel_windows_around_selection() {
        let mut state = state();
        let request = state.begin_search("rust", 1, false);
        state.finish_search(&request, Ok(page("a", 40)));
        state.selected_index = 30;

        let vm = state.compute_viewmodel(23, 100);

        assert_eq!(vm.display_items.len(), 10);
        assert!(vm.display_items[vm.selected_index].is_selected);
        assert_eq!(vm.display_items[vm.selected_index].title, "a book 30");
        assert_eq!(
            vm.detail.unwrap().cover_url,
            "https://covers.openlibrary.org/b/id/30-M.jpg"
        );
    }

    #[test]
    fn viewmodel_reports_filter_miss_and_load_more() {
        let mut state = state();
        let request = state.begin_search("rust", 1, false);
        state.finish_search(&request, Ok(page("a", PAGE_SIZE)));

        let vm = state.compute_viewmodel(30, 100);
        assert!(vm.footer.load_more);
        assert!(vm.empty_state.is_none());

        state.filter.year = "2999".into();
        let vm = state.compute_viewmodel(30, 100);
        assert_eq!(vm.empty_state.unwrap().message, "No books match the filters");
        assert!(vm.detail.is_none());
    }

    #[test]
    fn author_matches_are_highlighted() {
        let mut state = state();
        state.filter.author = "love".into();

        assert_eq!(state.author_highlight_ranges("Ada Lovelace"), vec![(4, 8)]);
        assert!(state.author_highlight_ranges("Alan Turing").is_empty());
    }

    #[test]
    fn unreadable_completion_clears_current_loading_only() {
        let mut state = state();
        let stale = state.begin_search("rust", 1, false);
        let _current = state.begin_search("go", 1, false);
        let error = BookFinderError::RequestContext("missing `query`".into());

        assert!(!state.abandon_search(Some(stale.generation), &error));
        assert!(state.is_loading);

        assert!(state.abandon_search(None, &error));
        assert!(!state.is_loading);
        assert_eq!(
            state.error_message.as_deref(),
            Some("Invalid request context: missing `query`")
        );
    }

    #[test]
    fn denied_web_access_stops_loading() {
        let mut state = state();
        let _request = state.begin_bootstrap_search();

        state.deny_web_access();

        assert!(state.web_access_denied);
        assert!(!state.is_loading);
        let vm = state.compute_viewmodel(30, 100);
        assert!(matches!(vm.status, Some(StatusLine::Error(_))));
        assert_eq!(
            vm.empty_state.unwrap().subtitle,
            "Reload the plugin and grant web access to search"
        );
    }

    #[test]
    fn theme_follows_toggle() {
        let mut state = state();
        assert_eq!(state.theme().name, "bookfinder-light");
        state.toggle_theme();
        assert_eq!(state.theme().name, "bookfinder-dark");
    }
}
