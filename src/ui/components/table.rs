//! Result table renderer.
//!
//! Each loaded book is one row with TITLE, AUTHOR, YEAR and LANGUAGE columns.
//! Cells arrive already truncated from the view model; this module only pads
//! and colors them.

use crate::app::state::{
    AppState, AUTHOR_COLUMN_WIDTH, LANGUAGE_COLUMN_WIDTH, YEAR_COLUMN_WIDTH,
};
use crate::ui::helpers::{self, pad_right, position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailInfo, DisplayItem};

/// Renders the table column headers at the specified row.
///
/// Returns the next available row position (row + 1).
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let title_width = AppState::title_column_width(cols);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", pad_right("TITLE", title_width));
    print!("{}", pad_right("AUTHOR", AUTHOR_COLUMN_WIDTH));
    print!("{}", pad_right("YEAR", YEAR_COLUMN_WIDTH));
    print!("{}", pad_right("LANGUAGE", LANGUAGE_COLUMN_WIDTH));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all table rows starting at the specified row.
///
/// Returns the next available row position (row + number of items).
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders a single table row.
///
/// Selection paints the whole row; author filter matches are highlighted only
/// on unselected rows. The row is padded to the full width so the selection
/// background is continuous.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let title_width = AppState::title_column_width(cols);

    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        print!("{}", Theme::bold());
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    print!("{}", pad_right(&item.title, title_width));

    helpers::render_highlighted_text(&item.author, &item.highlight_ranges, theme, item.is_selected);
    print!(
        "{}",
        " ".repeat(AUTHOR_COLUMN_WIDTH.saturating_sub(text_width(&item.author)))
    );

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", pad_right(&item.year, YEAR_COLUMN_WIDTH));
    print!("{}", pad_right(&item.language, LANGUAGE_COLUMN_WIDTH));

    let line_len = title_width + AUTHOR_COLUMN_WIDTH + YEAR_COLUMN_WIDTH + LANGUAGE_COLUMN_WIDTH;
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}

/// Renders the cover link of the selected book at the specified row.
///
/// Returns the next available row position (row + 1).
pub fn render_detail(row: usize, detail: Option<&DetailInfo>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if let Some(detail) = detail {
        let text = if detail.id.is_empty() {
            format!("  Cover: {}", detail.cover_url)
        } else {
            format!("  {}  Cover: {}", detail.id, detail.cover_url)
        };
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", truncate(&text, cols));
    }

    print!("{}", Theme::reset());
    row + 1
}
