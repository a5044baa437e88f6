//! Search input box and categorical filter chips.

use crate::ui::helpers::{position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FilterChip, SearchBarInfo};

const SEARCH_BOX_MARGIN: usize = 5;

pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if search.focused { "▏" } else { "" };
    let search_text = truncate(&format!(" Search: {}{cursor}", search.query), inner_width);
    let padding = inner_width.saturating_sub(width(&search_text));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}│", Theme::fg(border));
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", " ".repeat(padding));
    print!("{}│", Theme::fg(border));
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// One line of `Label: value` chips; the focused chip is inverted.
pub fn render_filter_chips(row: usize, chips: &[FilterChip], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let mut used = 1;
    print!(" ");

    for chip in chips {
        let text = format!(" {}: {} ", chip.label, chip.value);
        let len = width(&text) + 1;
        if used + len > cols {
            break;
        }

        if chip.focused {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else if chip.value == crate::query::ALL {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        } else {
            print!("{}", Theme::fg(&theme.colors.info));
        }
        print!("{text}");
        print!("{} ", Theme::reset());
        used += len;
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}
