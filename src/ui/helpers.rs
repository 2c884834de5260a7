//! Shared rendering utilities and helpers.
//!
//! Low-level text utilities used across the UI components. Everything here
//! works on character indices, never byte indices, so titles and author names
//! in any script can be cut and highlighted without splitting a code point.

use crate::ui::theme::Theme;

/// Marker appended to truncated text.
const ELLIPSIS: char = '…';

/// Positions the cursor at a specific row and column.
///
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`, used as its display width.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max` characters, ending with `…` when cut.
///
/// ```rust
/// use bookfinder::ui::helpers::truncate;
///
/// assert_eq!(truncate("Structure and Interpretation", 12), "Structure a…");
/// assert_eq!(truncate("SICP", 12), "SICP");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text_width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out: String = text.chars().take(max - 1).collect();
    out.push(ELLIPSIS);
    out
}

/// Pads `text` with spaces to `width` characters.
#[must_use]
pub fn pad_right(text: &str, width: usize) -> String {
    let len = text_width(text);
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Splits `text` into `(segment, highlighted)` runs for the given character
/// ranges.
///
/// Ranges past the end of the text are clipped; overlapping or unsorted ranges
/// are skipped.
#[must_use]
pub fn highlight_segments(text: &str, ranges: &[(usize, usize)]) -> Vec<(String, bool)> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || end <= start {
            continue;
        }

        if start > current_pos {
            segments.push((chars[current_pos..start].iter().collect(), false));
        }
        segments.push((chars[start..end].iter().collect(), true));
        current_pos = end;
    }

    if current_pos < chars.len() {
        segments.push((chars[current_pos..].iter().collect(), false));
    }

    segments
}

/// Renders text with highlighted character ranges for author filter matches.
///
/// When `is_selected` is `true`, highlighting is skipped so it does not fight
/// with the selection background.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    for (segment, highlighted) in highlight_segments(text, ranges) {
        if highlighted {
            print!("{}", Theme::fg(theme.colors.highlight_fg()));
            print!("{}", Theme::bg(theme.colors.highlight_bg()));
            print!("{segment}");
            print!("{}", Theme::reset());
            print!("{}", Theme::fg(&theme.colors.text_normal));
        } else {
            print!("{segment}");
        }
    }
}
