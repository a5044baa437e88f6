//! Centered placeholder messages for loading and empty bodies.

use crate::ui::helpers::{centered, position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

fn render_centered(row: usize, text: &str, style: &str, cols: usize) {
    let text = truncate(text, cols);
    let len = width(&text);
    let padding = centered(len, cols);

    position_cursor(row, 1);
    print!("{style}");
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
}

pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    render_centered(row + 2, &empty.message, &Theme::fg(&theme.colors.empty_state_fg), cols);
    let dim = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    render_centered(row + 3, &empty.subtitle, &dim, cols);
    row + 4
}

pub fn render_loading(row: usize, message: &str, theme: &Theme, cols: usize) -> usize {
    let dim = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    render_centered(row + 2, message, &dim, cols);
    row + 3
}
