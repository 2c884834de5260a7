//! Loading and error indicator line.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

/// Renders the status line at the specified row.
///
/// A blank row when there is nothing to report, so the table never shifts.
///
/// Returns the next available row position (row + 1).
pub fn render_status(row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    match status {
        Some(StatusLine::Loading) => {
            print!("{}", Theme::fg(&theme.colors.loading_fg));
            print!("  Loading books…");
        }
        Some(StatusLine::Error(message)) => {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.error_fg));
            print!("  {}", truncate(message, cols.saturating_sub(2)));
        }
        None => {}
    }

    print!("{}", Theme::reset());
    row + 1
}
