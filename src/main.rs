//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the BookFinder library and
//! the Zellij plugin system. It translates Zellij events into [`Event`]s and
//! executes the [`Action`]s the handler returns.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess`; once granted, run the default search
//! 3. **Subscribe**: Register for `Key`, `WebRequestResult` and
//!    `PermissionRequestResult` events
//! 4. **Update**: Map events, run the handler, execute actions
//! 5. **Render**: Draw the search view
//!
//! # Fetching
//!
//! `web_request` returns immediately. The response arrives later as a
//! `WebRequestResult` carrying the context map the request was issued with,
//! which is decoded back into the originating [`SearchRequest`].
//!
//! [`SearchRequest`]: bookfinder::openlibrary::SearchRequest

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use bookfinder::openlibrary::SearchRequest;
use bookfinder::{handle_event, Action, Config, Event};

register_plugin!(State);

struct State {
    app: bookfinder::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: bookfinder::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        bookfinder::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(config = ?config, "parsed configuration");
        self.app = bookfinder::initialize(&config);

        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        // Completions continue the trace of the span that issued the request,
        // so the context has to be attached before any span is entered.
        let _trace_guard = match &event {
            zellij_tile::prelude::Event::WebRequestResult(_, _, _, context) => {
                SearchRequest::from_context(context)
                    .ok()
                    .and_then(|request| request.trace_context)
                    .and_then(|trace| trace.attach())
            }
            _ => None,
        };

        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"), event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match Self::map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                match Self::map_permission_result(permissions) {
                    Some(event) => event,
                    None => return false,
                }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    Self::execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        bookfinder::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('r') => Some(Event::Clear),
                BareKey::Char('t') => Some(Event::ToggleTheme),
                BareKey::Char('n') => Some(Event::LoadMore),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::FocusPrevious,
            BareKey::Tab => Event::FocusNext,
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::CloseFocus,
            BareKey::Backspace => Event::Backspace,
            BareKey::Down => Event::SelectionDown,
            BareKey::Up => Event::SelectionUp,
            BareKey::Right => Event::CycleLanguageNext,
            BareKey::Left => Event::CycleLanguagePrevious,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_web_request_result(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        if !SearchRequest::is_own_context(context) {
            tracing::debug!("ignoring web request result issued elsewhere");
            return None;
        }

        match SearchRequest::from_context(context) {
            Ok(request) => {
                tracing::info!(
                    generation = request.generation,
                    page = request.page,
                    status = status,
                    latency_ms = request.elapsed_ms(),
                    "search request completed"
                );
                Some(Event::SearchCompleted {
                    request,
                    status,
                    body,
                })
            }
            Err(e) => {
                tracing::error!(error = %e, status = status, "undecodable web request context");
                Some(Event::CompletionUnreadable {
                    generation: SearchRequest::generation_from_context(context),
                    reason: e.to_string(),
                })
            }
        }
    }

    fn map_permission_result(permissions: PermissionStatus) -> Option<Event> {
        match permissions {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - running default search");
                Some(Event::Mounted)
            }
            PermissionStatus::Denied => {
                tracing::warn!("web access denied - searches cannot run");
                Some(Event::PermissionDenied)
            }
        }
    }

    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::FetchPage(request) => {
                let url = request.url();
                tracing::info!(
                    generation = request.generation,
                    query = %request.query,
                    page = request.page,
                    append = request.append,
                    "fetching search page"
                );
                web_request(
                    url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    request.to_context(),
                );
            }
        }
    }
}
