//! Metric tiles for the dashboard and reports screens.

use crate::ui::helpers::{fit, position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TilesView;

const TILE_WIDTH: usize = 38;

pub fn render_tiles(row: usize, view: &TilesView, theme: &Theme, cols: usize, last_row: usize) -> usize {
    let mut current_row = row;

    if let Some(caption) = &view.caption {
        position_cursor(current_row, 1);
        print!("{}", Theme::fg(&theme.colors.info));
        print!("  {}", truncate(caption, cols.saturating_sub(2)));
        print!("{}", Theme::reset());
        current_row += 2;
    }

    let per_line = (cols.saturating_sub(2) / TILE_WIDTH).max(1);

    for section in &view.sections {
        if current_row > last_row {
            break;
        }
        position_cursor(current_row, 1);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.header_fg));
        print!("  {}", section.title);
        print!("{}", Theme::reset());
        current_row += 1;

        for chunk in section.tiles.chunks(per_line) {
            if current_row > last_row {
                break;
            }
            position_cursor(current_row, 1);
            print!("  ");
            for tile in chunk {
                let value_len = width(&tile.value);
                let label = fit(&tile.label, TILE_WIDTH.saturating_sub(value_len + 3), false);
                print!("{}{label}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
                print!(" {}{}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal), tile.value);
                print!("{}  ", Theme::reset());
            }
            current_row += 1;
        }
        current_row += 1;
    }

    current_row
}
