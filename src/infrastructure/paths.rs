//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, which maps to
//! the directory Zellij was started from (usually the user's home).

use std::path::PathBuf;

/// Directory holding the span file.
///
/// Resolves to `~/.local/share/zellij/bookfinder` on the host when Zellij was
/// started from the home directory.
///
/// ```
/// use bookfinder::infrastructure::paths::data_dir;
///
/// assert_eq!(data_dir().to_str(), Some("/host/.local/share/zellij/bookfinder"));
/// ```
#[must_use]
pub fn data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("bookfinder")
}

/// Maps a `~`-prefixed path onto the sandbox's `/host` mount.
///
/// Used for user-supplied theme file paths.
///
/// ```
/// use bookfinder::infrastructure::paths::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/rose.toml"), "/host/themes/rose.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
