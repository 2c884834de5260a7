//! View model types representing renderable UI state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) on every render
//! and consumed by the renderer. They hold display-ready strings only; all
//! filtering, windowing and truncation has already happened.

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub controls: ControlsInfo,
    /// Loading or error line shown between the controls and the results.
    pub status: Option<StatusLine>,
    /// Visible window of the filtered results.
    pub display_items: Vec<DisplayItem>,
    /// Index of the selected item within `display_items`.
    pub selected_index: usize,
    /// Shown in place of the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,
    /// Cover link of the selected book.
    pub detail: Option<DetailInfo>,
    pub footer: FooterInfo,
}

/// Title bar text.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    pub subtitle: String,
}

/// Current values of the search and filter controls.
#[derive(Debug, Clone)]
pub struct ControlsInfo {
    pub query: ControlField,
    pub author: ControlField,
    pub language: ControlField,
    pub year: ControlField,
}

/// One labeled input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlField {
    pub label: &'static str,
    pub value: String,
    pub focused: bool,
}

/// Loading and error indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Loading,
    Error(String),
}

/// One result card, laid out as a table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub title: String,
    pub author: String,
    pub year: String,
    pub language: String,
    pub is_selected: bool,

    /// Character ranges of `author` matching the author filter.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Details of the selected book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub id: String,
    pub cover_url: String,
}

/// Empty result message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Footer help text.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,

    /// Whether the "Load More" affordance is offered.
    pub load_more: bool,
}
