//! Open Library search API: endpoints, query construction and cover URLs.
//!
//! Everything the plugin knows about the remote service lives here. The actual
//! HTTP call is issued by the plugin shim through Zellij's `web_request`; this
//! module only builds URLs, encodes the request context that travels with the
//! call, and decodes the response body.
//!
//! # Modules
//!
//! - [`request`]: Search request descriptor and its context-map encoding
//! - [`response`]: Wire types and normalization into [`BookRecord`](crate::domain::BookRecord)

pub mod request;
pub mod response;

pub use request::{SearchRequest, TraceContext};
pub use response::{parse_search_page, RawDoc, SearchResponse};

/// Base URL of the search endpoint.
pub const SEARCH_ENDPOINT: &str = "https://openlibrary.org/search.json";

/// Number of records requested per page.
///
/// A page holding exactly this many records signals that more pages exist.
pub const PAGE_SIZE: usize = 50;

/// Query used when the user submits an empty search.
pub const DEFAULT_QUERY: &str = "computer science";

/// Query used for the automatic search on mount and for "Clear".
pub const BOOTSTRAP_QUERY: &str = "computer science engineering";

/// Shown for records without a cover image.
pub const PLACEHOLDER_COVER_URL: &str =
    "https://via.placeholder.com/180x260?text=No+Cover+Available";

/// Returns the trimmed query, or [`DEFAULT_QUERY`] if nothing is left.
///
/// # Example
///
/// ```
/// use bookfinder::openlibrary::effective_query;
///
/// assert_eq!(effective_query("  Data Structures "), "Data Structures");
/// assert_eq!(effective_query("   "), "computer science");
/// ```
#[must_use]
pub fn effective_query(search_term: &str) -> String {
    let trimmed = search_term.trim();
    if trimmed.is_empty() {
        DEFAULT_QUERY.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Builds the title-search URL for `query` and `page`.
///
/// The query is percent-encoded; it is expected to already be the effective query.
#[must_use]
pub fn search_url(query: &str, page: u32) -> String {
    format!(
        "{SEARCH_ENDPOINT}?title={}&limit={PAGE_SIZE}&page={page}",
        urlencoding::encode(query)
    )
}

/// Resolves the medium-size cover image URL for a cover id.
///
/// Missing, zero and negative ids resolve to [`PLACEHOLDER_COVER_URL`].
///
/// # Example
///
/// ```
/// use bookfinder::openlibrary::{cover_url, PLACEHOLDER_COVER_URL};
///
/// assert_eq!(cover_url(None), PLACEHOLDER_COVER_URL);
/// assert_eq!(cover_url(Some(12345)), "https://covers.openlibrary.org/b/id/12345-M.jpg");
/// ```
#[must_use]
pub fn cover_url(cover_image_id: Option<i64>) -> String {
    match cover_image_id {
        Some(id) if id > 0 => format!("https://covers.openlibrary.org/b/id/{id}-M.jpg"),
        _ => PLACEHOLDER_COVER_URL.to_string(),
    }
}
