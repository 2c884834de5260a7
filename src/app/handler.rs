//! Event handling and state transition logic.
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime (keys, permission results, web
//!    request completions)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Editing**: `Char`, `Backspace`
//! - **Navigation**: `FocusNext`, `FocusPrevious`, `SelectionDown`, `SelectionUp`,
//!   `CycleLanguageNext`, `CycleLanguagePrevious`
//! - **Commands**: `Submit`, `Clear`, `LoadMore`, `ToggleTheme`, `CloseFocus`
//! - **System**: `Mounted`, `PermissionDenied`, `SearchCompleted`,
//!   `CompletionUnreadable`
//!
//! # Example
//!
//! ```rust
//! use bookfinder::app::{handle_event, Action, AppState, Event};
//! use bookfinder::ui::theme::ThemePair;
//!
//! let mut state = AppState::new(ThemePair::default(), false);
//! let (should_render, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(should_render);
//! assert!(matches!(actions.as_slice(), [Action::FetchPage(_)]));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::modes::Focus;
use crate::app::{Action, AppState};
use crate::domain::{BookFinderError, Result};
use crate::openlibrary::{self, SearchRequest};

/// Events triggered by user input or by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Types a character into the focused control.
    ///
    /// Text controls append it. The language control cycles on space, and the
    /// result list moves the selection on `j` / `k`.
    Char(char),
    /// Removes the last character of the focused text control.
    Backspace,

    FocusNext,
    FocusPrevious,

    /// Selects the next language option (language control only).
    CycleLanguageNext,
    /// Selects the previous language option (language control only).
    CycleLanguagePrevious,

    /// Moves the result selection down by one (wraps to top).
    SelectionDown,
    /// Moves the result selection up by one (wraps to bottom).
    SelectionUp,

    /// Searches for the query text from the first page.
    Submit,
    /// Re-runs the default search. Query text and filters are kept.
    Clear,
    /// Fetches the next page of the current query and appends it.
    LoadMore,
    ToggleTheme,
    /// Hides the plugin pane.
    CloseFocus,

    /// The plugin has the permissions it needs; runs the initial search.
    Mounted,

    /// The host refused `WebAccess`. Later searches fail without a fetch.
    PermissionDenied,

    /// A page fetch finished.
    ///
    /// `request` is decoded from the context map that came back with the
    /// response.
    SearchCompleted {
        request: SearchRequest,
        /// HTTP status code of the response.
        status: u16,
        body: Vec<u8>,
    },

    /// A page fetch of ours finished, but its context map could not be decoded.
    CompletionUnreadable {
        /// Request generation, if it could still be read.
        generation: Option<u64>,
        reason: String,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the view needs a re-render, plus the actions to execute in
/// order. The action list is empty for events without side effects.
///
/// # Errors
///
/// No event currently fails; fetch and decode failures are recorded in
/// [`AppState::error_message`] instead of being returned.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %event_name(event)).entered();

    match event {
        Event::Char(c) => Ok(handle_char(state, *c)),
        Event::Backspace => {
            let Some(field) = focused_text(state) else {
                return Ok((false, vec![]));
            };
            if field.pop().is_none() {
                return Ok((false, vec![]));
            }
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::FocusNext => {
            state.focus = state.focus.next();
            Ok((true, vec![]))
        }
        Event::FocusPrevious => {
            state.focus = state.focus.previous();
            Ok((true, vec![]))
        }
        Event::CycleLanguageNext => {
            if state.focus != Focus::LanguageFilter {
                return Ok((false, vec![]));
            }
            state.filter.language = state.filter.language.next();
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::CycleLanguagePrevious => {
            if state.focus != Focus::LanguageFilter {
                return Ok((false, vec![]));
            }
            state.filter.language = state.filter.language.previous();
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::SelectionDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::SelectionUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::Submit => {
            let term = state.query_text.clone();
            let request = state.begin_search(&term, 1, false);
            Ok(fetch(state, request))
        }
        Event::Mounted => {
            state.web_access_denied = false;
            let request = state.begin_bootstrap_search();
            Ok(fetch(state, request))
        }
        Event::Clear => {
            let request = state.begin_bootstrap_search();
            Ok(fetch(state, request))
        }
        Event::LoadMore => match state.begin_load_more() {
            Some(request) => Ok(fetch(state, request)),
            None => Ok((false, vec![])),
        },
        Event::PermissionDenied => {
            state.deny_web_access();
            Ok((true, vec![]))
        }
        Event::ToggleTheme => {
            state.toggle_theme();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SearchCompleted {
            request,
            status,
            body,
        } => {
            tracing::debug!(
                generation = request.generation,
                status = status,
                bytes = body.len(),
                "search response received"
            );

            let outcome = if (200..300).contains(status) {
                openlibrary::parse_search_page(body)
            } else {
                Err(BookFinderError::RemoteFetch { status: *status })
            };

            Ok((state.finish_search(request, outcome), vec![]))
        }
        Event::CompletionUnreadable { generation, reason } => {
            let error = BookFinderError::RequestContext(reason.clone());
            Ok((state.abandon_search(*generation, &error), vec![]))
        }
    }
}

/// Issues `request`, or fails it on the spot when the host cannot fetch.
fn fetch(state: &mut AppState, request: SearchRequest) -> (bool, Vec<Action>) {
    if state.web_access_denied {
        state.finish_search(&request, Err(BookFinderError::WebAccessDenied));
        return (true, vec![]);
    }
    (true, vec![Action::FetchPage(request)])
}

fn handle_char(state: &mut AppState, c: char) -> (bool, Vec<Action>) {
    match state.focus {
        Focus::LanguageFilter if c == ' ' => {
            state.filter.language = state.filter.language.next();
            state.clamp_selection();
            (true, vec![])
        }
        Focus::Results if c == 'j' => {
            state.move_selection_down();
            (true, vec![])
        }
        Focus::Results if c == 'k' => {
            state.move_selection_up();
            (true, vec![])
        }
        _ => {
            let Some(field) = focused_text(state) else {
                return (false, vec![]);
            };
            field.push(c);
            tracing::trace!(focus = ?state.focus, char = %c, "input updated");
            state.clamp_selection();
            (true, vec![])
        }
    }
}

/// The text buffer behind the focused control, if it takes text.
fn focused_text(state: &mut AppState) -> Option<&mut String> {
    match state.focus {
        Focus::Query => Some(&mut state.query_text),
        Focus::AuthorFilter => Some(&mut state.filter.author),
        Focus::YearFilter => Some(&mut state.filter.year),
        Focus::LanguageFilter | Focus::Results => None,
    }
}

/// Short event label for span fields; completions carry whole response bodies.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Char(_) => "char",
        Event::Backspace => "backspace",
        Event::FocusNext => "focus_next",
        Event::FocusPrevious => "focus_previous",
        Event::CycleLanguageNext => "cycle_language_next",
        Event::CycleLanguagePrevious => "cycle_language_previous",
        Event::SelectionDown => "selection_down",
        Event::SelectionUp => "selection_up",
        Event::Submit => "submit",
        Event::Clear => "clear",
        Event::LoadMore => "load_more",
        Event::ToggleTheme => "toggle_theme",
        Event::CloseFocus => "close_focus",
        Event::Mounted => "mounted",
        Event::PermissionDenied => "permission_denied",
        Event::SearchCompleted { .. } => "search_completed",
        Event::CompletionUnreadable { .. } => "completion_unreadable",
    }
}
