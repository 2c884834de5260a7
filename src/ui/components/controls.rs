//! Search and filter controls renderer.
//!
//! Two lines: the query input, then the author, language and year filters side
//! by side. The focused control gets the focus border color and a cursor.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ControlField, ControlsInfo};

/// Horizontal margin on the left of the controls.
const CONTROLS_MARGIN: usize = 2;

const CURSOR: char = '▏';

/// Widest value shown in a filter control.
const FILTER_VALUE_WIDTH: usize = 16;

/// Renders the controls starting at the specified row.
///
/// ```text
///   Search [Data Structures▏                                      ]
///   Author [knuth           ]  Language ‹English›  Year [19      ]
/// ```
///
/// Returns the next available row position (row + 2).
pub fn render_controls(row: usize, controls: &ControlsInfo, theme: &Theme, cols: usize) -> usize {
    let query_width = cols
        .saturating_sub(CONTROLS_MARGIN * 2)
        .saturating_sub(text_width(controls.query.label) + 3);

    position_cursor(row, 1);
    print!("{}", " ".repeat(CONTROLS_MARGIN));
    render_text_field(&controls.query, query_width, theme);
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(CONTROLS_MARGIN));
    render_text_field(&controls.author, FILTER_VALUE_WIDTH, theme);
    print!("  ");
    render_choice_field(&controls.language, theme);
    print!("  ");
    render_text_field(&controls.year, FILTER_VALUE_WIDTH / 2, theme);
    print!("{}", Theme::reset());

    row + 2
}

fn render_label(field: &ControlField, theme: &Theme) {
    if field.focused {
        print!("{}", Theme::bold());
    }
    print!("{}", Theme::fg(&theme.colors.accent));
    print!("{} ", field.label);
    print!("{}", Theme::reset());
}

fn border_color(field: &ControlField, theme: &Theme) -> String {
    if field.focused {
        Theme::fg(&theme.colors.input_focus_border)
    } else {
        Theme::fg(&theme.colors.input_border)
    }
}

/// `Label [value▏   ]`, value cut to `width` characters.
fn render_text_field(field: &ControlField, width: usize, theme: &Theme) {
    render_label(field, theme);

    let cursor_len = usize::from(field.focused);
    let value = truncate(&field.value, width.saturating_sub(cursor_len));

    print!("{}", border_color(field, theme));
    print!("[");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{value}");
    if field.focused {
        print!("{}", Theme::fg(&theme.colors.input_focus_border));
        print!("{CURSOR}");
    }
    print!("{}", " ".repeat(width.saturating_sub(text_width(&value) + cursor_len)));
    print!("{}", border_color(field, theme));
    print!("]");
    print!("{}", Theme::reset());
}

/// `Label ‹value›`, for the option cycler.
fn render_choice_field(field: &ControlField, theme: &Theme) {
    render_label(field, theme);

    print!("{}", border_color(field, theme));
    print!("‹");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", field.value);
    print!("{}", border_color(field, theme));
    print!("›");
    print!("{}", Theme::reset());
}
