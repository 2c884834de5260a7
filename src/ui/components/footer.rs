//! Footer component renderer.
//!
//! Renders the help bar with keybinding hints and, when another page can be
//! fetched, the "Load More" hint.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

const LOAD_MORE_HINT: &str = "  Ctrl+n: Load More";

/// Renders the footer help bar at the specified row.
///
/// Keybindings are centered and dimmed. The load-more hint follows them in the
/// accent color. Text wider than the pane is truncated.
///
/// Returns the next available row position (row + 1).
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let hint = if footer.load_more { LOAD_MORE_HINT } else { "" };
    let hint_len = text_width(hint);

    let help_text = truncate(&footer.keybindings, cols.saturating_sub(hint_len));
    let text_len = text_width(&help_text) + hint_len;
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    if footer.load_more {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.accent));
        print!("{hint}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}
