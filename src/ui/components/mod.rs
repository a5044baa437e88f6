//! Composable UI component renderers.
//!
//! Each component prints one region and returns the next free row.
//!
//! # Layout
//!
//! ```text
//! row 2        header (title, LIVE/DEMO badge)
//!              ──────────────────────────────
//!              search bar        (when searching)
//!              filter chips      (table screens with filters)
//!              body: table | tiles | loading | empty
//!              pager             (table screens)
//! rows - 2     ──────────────────────────────
//! rows - 1     footer (keys or status)
//! ```
//!
//! Modal dialogs and the palette are drawn last, over the body.

mod empty;
mod footer;
mod header;
mod metrics;
mod modal;
mod palette;
mod search;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

use empty::{render_empty_state, render_loading};
use footer::render_footer;
use header::render_header;
use metrics::render_tiles;
use modal::render_modal;
use palette::render_palette;
use search::{render_filter_chips, render_search_bar};
use table::{render_pager, render_table_headers, render_table_rows};

fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a full frame.
pub fn render_screen(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_row = rows.saturating_sub(1);
    let bottom_border = footer_row.saturating_sub(1);

    let mut current_row = 2;
    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    if !vm.filter_chips.is_empty() {
        current_row = render_filter_chips(current_row, &vm.filter_chips, theme, cols);
    }

    match &vm.body {
        Body::Loading(message) => {
            render_loading(current_row, message, theme, cols);
        }
        Body::Empty(empty) => {
            render_empty_state(current_row, empty, theme, cols);
        }
        Body::Table(table) => {
            current_row = render_table_headers(current_row, &table.columns, theme, cols);
            render_table_rows(current_row, &table.columns, &table.rows, theme, cols);
            render_pager(bottom_border.saturating_sub(1), &table.pager, theme, cols);
        }
        Body::Tiles(tiles) => {
            render_tiles(current_row + 1, tiles, theme, cols, bottom_border.saturating_sub(1));
        }
    }

    render_border(bottom_border, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(modal) = &vm.modal {
        render_modal(modal, theme, rows, cols);
    }
    if let Some(palette) = &vm.palette {
        render_palette(palette, theme, rows, cols);
    }
}
