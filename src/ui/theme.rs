//! Theme management and ANSI escape sequence generation.
//!
//! The search view has a light and a dark appearance and the user flips between
//! them at runtime. Both are regular [`Theme`]s; [`ThemePair`] holds the two that
//! were configured.
//!
//! # Built-in Themes
//!
//! - `bookfinder-light`: Pink accents on a light background (default light)
//! - `bookfinder-dark`: Softer pink accents on near-black (default dark)
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#d94864"
//! text_normal = "#2b2b2b"
//! text_dim = "#6b6b6b"
//! accent = "#ff6b9a"
//! border = "#f3c6d2"
//! selection_fg = "#ffffff"
//! selection_bg = "#ff6b9a"
//! input_border = "#cccccc"
//! input_focus_border = "#d94864"
//! error_fg = "#e02424"
//! loading_fg = "#ff6b9a"
//! empty_state_fg = "#d94864"
//! ```

use crate::domain::{BookFinderError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the built-in light theme.
pub const LIGHT_THEME: &str = "bookfinder-light";

/// Name of the built-in dark theme.
pub const DARK_THEME: &str = "bookfinder-dark";

/// Color scheme for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Title text color.
    pub header_fg: String,
    /// Optional title background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Secondary text (subtitle, footer, card metadata).
    pub text_dim: String,

    /// Labels and the load-more hint.
    pub accent: String,
    pub border: String,

    pub selection_fg: String,
    pub selection_bg: String,

    pub input_border: String,
    pub input_focus_border: String,

    pub error_fg: String,
    pub loading_fg: String,
    pub empty_state_fg: String,

    /// Author filter match highlight foreground. Defaults to `selection_fg`.
    #[serde(default)]
    pub match_highlight_fg: Option<String>,
    /// Author filter match highlight background. Defaults to `accent`.
    #[serde(default)]
    pub match_highlight_bg: Option<String>,
}

impl ThemeColors {
    #[must_use]
    pub fn highlight_fg(&self) -> &str {
        self.match_highlight_fg.as_deref().unwrap_or(&self.selection_fg)
    }

    #[must_use]
    pub fn highlight_bg(&self) -> &str {
        self.match_highlight_bg.as_deref().unwrap_or(&self.accent)
    }
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` if the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            LIGHT_THEME => include_str!("../../themes/bookfinder-light.toml"),
            DARK_THEME => include_str!("../../themes/bookfinder-dark.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BookFinderError::Io`] if the file cannot be read and
    /// [`BookFinderError::Theme`] if it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| BookFinderError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Built-in light theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse, which would be a build defect.
    #[must_use]
    pub fn light() -> Self {
        Self::from_name(LIGHT_THEME).expect("built-in light theme should always parse")
    }

    /// Built-in dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse, which would be a build defect.
    #[must_use]
    pub fn dark() -> Self {
        Self::from_name(DARK_THEME).expect("built-in dark theme should always parse")
    }

    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color escape sequence for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// The light and dark themes the view toggles between.
#[derive(Debug, Clone)]
pub struct ThemePair {
    pub light: Theme,
    pub dark: Theme,
}

impl ThemePair {
    /// Returns the dark theme if `dark` is set, the light one otherwise.
    #[must_use]
    pub const fn select(&self, dark: bool) -> &Theme {
        if dark {
            &self.dark
        } else {
            &self.light
        }
    }
}

impl Default for ThemePair {
    fn default() -> Self {
        Self {
            light: Theme::light(),
            dark: Theme::dark(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_themes_parse() {
        assert_eq!(Theme::light().name, LIGHT_THEME);
        assert_eq!(Theme::dark().name, DARK_THEME);
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn pair_selects_by_flag() {
        let pair = ThemePair::default();
        assert_eq!(pair.select(false).name, LIGHT_THEME);
        assert_eq!(pair.select(true).name, DARK_THEME);
    }

    #[test]
    fn fg_and_bg_encode_rgb() {
        assert_eq!(Theme::fg("#ff6b9a"), "\u{1b}[38;2;255;107;154m");
        assert_eq!(Theme::bg("1a1a1a"), "\u{1b}[48;2;26;26;26m");
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn loads_theme_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let contents = include_str!("../../themes/bookfinder-dark.toml")
            .replace("bookfinder-dark", "midnight");
        file.write_all(contents.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "midnight");
        assert_eq!(theme.colors.highlight_bg(), theme.colors.accent);
    }

    #[test]
    fn invalid_theme_file_is_a_theme_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = 3").unwrap();

        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(matches!(err, BookFinderError::Theme(_)));
    }

    #[test]
    fn missing_theme_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = Theme::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, BookFinderError::Io(_)));
    }
}
