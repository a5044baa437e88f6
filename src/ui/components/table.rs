//! Record table: column titles, rows of the current page, and the pager.

use crate::ui::helpers::{fit, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnView, PagerInfo, RowView};

pub fn render_table_headers(row: usize, columns: &[ColumnView], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));

    let mut used = 0;
    for column in columns {
        print!(" {}", fit(&column.title, column.width, column.align_right));
        used += column.width + 1;
    }
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    print!("{}", Theme::reset());
    row + 1
}

pub fn render_table_rows(row: usize, columns: &[ColumnView], rows: &[RowView], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in rows {
        current_row = render_table_row(current_row, columns, item, theme, cols);
    }
    current_row
}

fn render_table_row(row: usize, columns: &[ColumnView], item: &RowView, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base = if item.is_selected {
        format!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg))
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    print!("{base}");

    let mut used = 0;
    for (column, cell) in columns.iter().zip(&item.cells) {
        let text = fit(&cell.text, column.width, column.align_right);
        match cell.tone {
            Some(tone) if !item.is_selected => {
                print!(" {}{text}{base}", Theme::fg(theme.tone(tone)));
            }
            _ => print!(" {text}"),
        }
        used += column.width + 1;
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
    row + 1
}

/// Right-aligned `Page 2/5 · 11–20 of 43`.
pub fn render_pager(row: usize, pager: &PagerInfo, theme: &Theme, cols: usize) -> usize {
    let text = format!(
        "Page {}/{} · {}–{} of {} ",
        pager.page, pager.total_pages, pager.first, pager.last, pager.total
    );

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(cols.saturating_sub(width(&text))));
    print!("{text}");
    print!("{}", Theme::reset());
    row + 1
}
