//! BookFinder: a Zellij plugin for searching the Open Library catalog.
//!
//! BookFinder turns a floating pane into a small book search tool:
//! - Title search against the Open Library search API, 50 results per page
//! - "Load more" pagination that appends the next page to the list
//! - Client-side author, language and year filters over the loaded results
//! - Cover image links for the selected book
//! - Light and dark themes, switchable at runtime

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - Key mapping, web_request, WebRequestResult       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌─────────────────────────┐   ┌─────────────────────────┐
//! │ UI Layer (ui/)          │   │ Open Library (openlibrary/)
//! │ - Rendering             │   │ - Search URLs, covers   │
//! │ - Theming               │   │ - Response decoding     │
//! │ - Components            │   │ - Request context       │
//! └─────────────────────────┘   └─────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │  ← Pure types
//! │  - Book record and normalization (domain/book)      │
//! │  - Result filters (domain/filter)                   │
//! │  - Error types (domain/error)                       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based JSON span export                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/bookfinder.wasm" {
//!         dark_mode "true"
//!         light_theme "bookfinder-light"
//!         dark_theme_file "~/.config/zellij/themes/bookfinder-midnight.toml"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse configuration, initialize tracing,
//!    create `AppState`, request `WebAccess`, subscribe to events.
//! 2. **Permission Granted**: [`Event::Mounted`] issues the default search.
//! 3. **Web Request Result**: the context map is decoded back into the
//!    originating request and handled as [`Event::SearchCompleted`].
//! 4. **UI Rendering**: compute the view model and render the components.
//!
//! # Example
//!
//! ```rust
//! use bookfinder::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! let (_, actions) = handle_event(&mut state, &Event::Mounted)?;
//! let Some(Action::FetchPage(request)) = actions.into_iter().next() else {
//!     panic!("mount should fetch the first page");
//! };
//!
//! let body = br#"{"docs":[{"key":"/works/OL1W","title":"Data Structures"}]}"#.to_vec();
//! handle_event(&mut state, &Event::SearchCompleted { request, status: 200, body })?;
//!
//! assert_eq!(state.filtered_books()[0].title, "Data Structures");
//! assert_eq!(state.filtered_books()[0].author_display, "Unknown Author");
//! # Ok::<(), bookfinder::BookFinderError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator with 24-bit color

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod openlibrary;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, Focus};
pub use domain::{BookFinderError, BookFilter, BookRecord, LanguageFilter, Result};
pub use ui::{Theme, ThemePair};

use std::collections::BTreeMap;
use ui::theme::{DARK_THEME, LIGHT_THEME};

/// Plugin configuration from the Zellij layout.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Start in dark mode.
    pub dark_mode: bool,

    /// Built-in theme used in light mode.
    pub light_theme: Option<String>,

    /// Built-in theme used in dark mode.
    pub dark_theme: Option<String>,

    /// TOML theme file for light mode; takes precedence over `light_theme`.
    pub light_theme_file: Option<String>,

    /// TOML theme file for dark mode; takes precedence over `dark_theme`.
    pub dark_theme_file: Option<String>,

    /// `EnvFilter` directive for span export, e.g. `"debug"`.
    pub trace_level: Option<String>,
}

impl Config {
    /// Reads the configuration from the plugin's KDL options.
    ///
    /// Invalid values are logged and replaced by their defaults.
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let dark_mode = config.get("dark_mode").map_or(false, |raw| {
            parse_flag("dark_mode", raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "invalid option, using light mode");
                false
            })
        });

        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            dark_mode,
            light_theme: non_empty("light_theme"),
            dark_theme: non_empty("dark_theme"),
            light_theme_file: non_empty("light_theme_file"),
            dark_theme_file: non_empty("dark_theme_file"),
            trace_level: non_empty("trace_level"),
        }
    }
}

/// Parses a boolean option value.
///
/// # Errors
///
/// Returns [`BookFinderError::Config`] for anything but `true`/`false`/`yes`/`no`/`1`/`0`.
pub fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(BookFinderError::Config(format!(
            "`{key}` must be true or false, got `{raw}`"
        ))),
    }
}

/// Resolves one theme slot: file, then built-in name, then `default_name`.
fn resolve_theme(file: Option<&String>, name: Option<&String>, default_name: &str) -> Theme {
    if let Some(file) = file {
        let path = infrastructure::expand_tilde(file);
        match Theme::from_file(&path) {
            Ok(theme) => return theme,
            Err(e) => {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
            }
        }
    }

    if let Some(name) = name {
        if let Some(theme) = Theme::from_name(name) {
            return theme;
        }
        tracing::warn!(theme_name = %name, "unknown theme, using default");
    }

    Theme::from_name(default_name).unwrap_or_default()
}

/// Builds the initial application state from the configuration.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(dark_mode = config.dark_mode, "initializing bookfinder plugin");

    let themes = ThemePair {
        light: resolve_theme(
            config.light_theme_file.as_ref(),
            config.light_theme.as_ref(),
            LIGHT_THEME,
        ),
        dark: resolve_theme(
            config.dark_theme_file.as_ref(),
            config.dark_theme.as_ref(),
            DARK_THEME,
        ),
    };

    AppState::new(themes, config.dark_mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn options(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert!(!config.dark_mode);
        assert!(config.trace_level.is_none());

        let state = initialize(&config);
        assert_eq!(state.theme().name, LIGHT_THEME);
        assert_eq!(state.themes.dark.name, DARK_THEME);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_zellij(&options(&[
            ("dark_mode", "sometimes"),
            ("light_theme", "no-such-theme"),
            ("trace_level", "  "),
        ]));
        assert!(!config.dark_mode);
        assert!(config.trace_level.is_none());

        let state = initialize(&config);
        assert_eq!(state.theme().name, LIGHT_THEME);
    }

    #[test]
    fn dark_mode_selects_dark_theme() {
        let config = Config::from_zellij(&options(&[("dark_mode", "TRUE")]));
        assert!(initialize(&config).is_dark_theme);
    }

    #[test]
    fn theme_file_takes_precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let contents = include_str!("../themes/bookfinder-light.toml")
            .replace("bookfinder-light", "paper");
        file.write_all(contents.as_bytes()).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = Config::from_zellij(&options(&[
            ("light_theme", DARK_THEME),
            ("light_theme_file", path.as_str()),
        ]));

        assert_eq!(initialize(&config).themes.light.name, "paper");
    }

    #[test]
    fn parse_flag_rejects_garbage() {
        assert!(parse_flag("dark_mode", "yes").unwrap());
        assert!(!parse_flag("dark_mode", "0").unwrap());
        assert!(matches!(
            parse_flag("dark_mode", "maybe"),
            Err(BookFinderError::Config(_))
        ));
    }
}
