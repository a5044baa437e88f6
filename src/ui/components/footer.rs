//! Help line, replaced by the status message when one is set.

use crate::ui::helpers::{centered, position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let (text, color) = match &footer.status {
        Some(status) => (truncate(&status.message, cols), theme.tone(status.tone)),
        None => (truncate(&footer.keybindings, cols), theme.colors.text_dim.as_str()),
    };

    let text_len = width(&text);
    let padding = centered(text_len, cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}
