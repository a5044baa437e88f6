//! Title bar with the data origin badge.

use crate::ui::helpers::{centered, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = width(&header.title);
    let padding = centered(title_len, cols);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);

    let mut used = padding + title_len;
    if let Some(badge) = &header.badge {
        let label = format!(" {} ", badge.label);
        let start = cols.saturating_sub(width(&label) + 1);
        if start > used {
            print!("{}", " ".repeat(start - used));
            print!("{}", Theme::reset());
            print!("{}{}", Theme::bold(), Theme::bg(theme.tone(badge.tone)));
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{label}");
            print!("{}", Theme::reset());
            used = start + width(&label);
        }
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
    row + 1
}
