//! Shared rendering utilities.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-based `(row, col)` cell.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Display width of `text`, counted in chars.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `max` chars, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Truncates or pads `text` to exactly `cells` chars.
#[must_use]
pub fn fit(text: &str, cells: usize, align_right: bool) -> String {
    let text = truncate(text, cells);
    let pad = cells.saturating_sub(width(&text));
    if align_right {
        format!("{}{text}", " ".repeat(pad))
    } else {
        format!("{text}{}", " ".repeat(pad))
    }
}

/// Left padding that centers `text_width` in `cols`.
#[must_use]
pub const fn centered(text_width: usize, cols: usize) -> usize {
    cols.saturating_sub(text_width) / 2
}

/// Prints `text` with the char ranges in `ranges` highlighted.
///
/// `restore` is re-emitted after each highlight so the surrounding style
/// carries on.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, restore: &str) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            let normal: String = chars[current_pos..start].iter().collect();
            print!("{normal}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted: String = chars[start.max(current_pos)..end.max(current_pos)].iter().collect();
        print!("{highlighted}");
        print!("{}{restore}", Theme::reset());

        current_pos = end.max(current_pos);
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}
