//! "Go to screen" overlay.

use crate::ui::helpers::{fit, position_cursor, render_highlighted_text, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaletteView;

const PALETTE_WIDTH: usize = 40;

pub fn render_palette(palette: &PaletteView, theme: &Theme, rows: usize, cols: usize) {
    let box_width = PALETTE_WIDTH.min(cols.saturating_sub(2)).max(12);
    let inner = box_width - 2;
    let left = (cols.saturating_sub(box_width) / 2).max(1);
    let visible = palette.items.len().min(rows.saturating_sub(8));
    let top = 4;
    let border = Theme::fg(&theme.colors.search_bar_border);

    position_cursor(top, left);
    let title = " Go to ";
    print!("{border}┌─{title}{}┐{}", "─".repeat(inner.saturating_sub(width(title) + 1)), Theme::reset());

    let query = truncate(&format!(" > {}▏", palette.query), inner);
    position_cursor(top + 1, left);
    print!("{border}│{}{}", Theme::reset(), Theme::fg(&theme.colors.text_normal));
    print!("{query}{}", " ".repeat(inner.saturating_sub(width(&query))));
    print!("{border}│{}", Theme::reset());

    for (idx, item) in palette.items.iter().take(visible).enumerate() {
        position_cursor(top + 2 + idx, left);
        print!("{border}│{}", Theme::reset());

        let restore = if item.is_selected {
            format!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg))
        } else {
            Theme::fg(&theme.colors.text_normal)
        };
        print!("{restore}  ");
        let title = truncate(&item.title, inner.saturating_sub(2));
        render_highlighted_text(&title, &item.highlight, theme, &restore);
        print!("{}", " ".repeat(inner.saturating_sub(width(&title) + 2)));
        print!("{}{border}│{}", Theme::reset(), Theme::reset());
    }

    let bottom = top + 2 + visible;
    position_cursor(bottom, left);
    if palette.items.is_empty() {
        print!("{border}│{}", Theme::reset());
        print!("{}{}", Theme::fg(&theme.colors.text_dim), fit("  No matching screen", inner, false));
        print!("{}{border}│{}", Theme::reset(), Theme::reset());
        position_cursor(bottom + 1, left);
    }
    print!("{border}└{}┘{}", "─".repeat(inner), Theme::reset());
}
