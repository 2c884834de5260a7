//! Error types for the BookFinder plugin.
//!
//! This module defines the centralized error type [`BookFinderError`] and a type alias
//! [`Result`] used throughout the plugin. All errors are implemented using the
//! `thiserror` crate.
//!
//! Search failures ([`BookFinderError::RemoteFetch`], [`BookFinderError::Decode`],
//! [`BookFinderError::WebAccessDenied`] and [`BookFinderError::RequestContext`]) are
//! converted to a display string at the search boundary and shown in the status
//! line. Everything else is logged.

use thiserror::Error;

/// The main error type for BookFinder operations.
#[derive(Debug, Error)]
pub enum BookFinderError {
    /// The search request was rejected by the network layer or answered with a
    /// non-success status.
    ///
    /// Network-unreachable, timeout and server errors all collapse into this
    /// variant; the status is kept for logging only.
    #[error("Failed to fetch from Open Library API")]
    RemoteFetch {
        /// HTTP status reported by the host for the failed request.
        status: u16,
    },

    /// The response body was not a valid search response document.
    #[error("Failed to read Open Library response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The host refused the `WebAccess` permission, so no search can be issued.
    #[error("Web access was denied, Open Library cannot be reached")]
    WebAccessDenied,

    /// A completed request carried a context map that could not be decoded.
    #[error("Invalid request context: {0}")]
    RequestContext(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for BookFinder operations.
pub type Result<T> = std::result::Result<T, BookFinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_fetch_message_is_fixed_regardless_of_status() {
        let not_found = BookFinderError::RemoteFetch { status: 404 };
        let unreachable = BookFinderError::RemoteFetch { status: 400 };

        assert_eq!(not_found.to_string(), "Failed to fetch from Open Library API");
        assert_eq!(not_found.to_string(), unreachable.to_string());
    }

    #[test]
    fn decode_error_wraps_serde_message() {
        let err: BookFinderError = serde_json::from_str::<serde_json::Value>("{")
            .map_err(BookFinderError::from)
            .unwrap_err();

        assert!(err.to_string().starts_with("Failed to read Open Library response"));
    }
}
