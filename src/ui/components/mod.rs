//! Composable UI component renderers.
//!
//! Each component renders one part of the pane and returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title and subtitle
//! - [`controls`]: Query input and author, language and year filters
//! - [`status`]: Loading and error indicator
//! - [`table`]: Result list with TITLE, AUTHOR, YEAR, LANGUAGE columns, plus the
//!   cover link of the selection
//! - [`empty`]: Message shown in place of the table when nothing is listed
//! - [`footer`]: Keybinding hints and the "Load More" hint

mod controls;
mod empty;
mod footer;
mod header;
mod status;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use controls::render_controls;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use status::render_status;
use table::{render_detail, render_table_headers, render_table_rows};

/// Renders a horizontal border line at the specified row.
///
/// Returns the next available row position (row + 1).
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full search view.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header title]
/// [Header subtitle]
/// [Border]
/// [Query input]
/// [Filters]
/// [Status line]
/// [Border]
/// [Table Headers]
/// [Table Rows, or the empty state]
/// [Selected book detail]
/// [Border]
/// [Footer]
/// ```
pub fn render_search_view(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_controls(current_row, &vm.controls, theme, cols);
    current_row = render_status(current_row, vm.status.as_ref(), theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_table_headers(current_row, theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else {
        render_table_rows(current_row, &vm.display_items, theme, cols);
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);
    let detail_row = border_row.saturating_sub(1);

    render_detail(detail_row, vm.detail.as_ref(), theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
