//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to Zellij directly. It mutates [`AppState`]
//! and returns a list of [`Action`]s that the plugin shim executes in order.
//!
//! [`AppState`]: crate::app::AppState

use crate::openlibrary::SearchRequest;

/// Commands produced by the event handler and executed by the plugin shim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues a `GET` for one page of search results.
    ///
    /// The request's context map travels with the web request and comes back with
    /// its result, which the shim turns into [`Event::SearchCompleted`].
    ///
    /// [`Event::SearchCompleted`]: crate::app::Event::SearchCompleted
    FetchPage(SearchRequest),
}
