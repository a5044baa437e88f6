//! Form and confirm dialogs drawn as a centered box over the body.

use crate::ui::helpers::{fit, position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ConfirmView, FormView, ModalView};

const MAX_WIDTH: usize = 64;
const LABEL_WIDTH: usize = 18;

/// Box geometry: first row, first col, outer width.
fn frame(height: usize, rows: usize, cols: usize) -> (usize, usize, usize) {
    let box_width = cols.saturating_sub(4).min(MAX_WIDTH).max(20);
    let top = (rows.saturating_sub(height) / 2).max(1);
    let left = (cols.saturating_sub(box_width) / 2).max(1);
    (top, left, box_width)
}

fn border_line(row: usize, left: usize, inner: usize, color: &str, ends: (char, char), title: &str) {
    position_cursor(row, left);
    print!("{}", Theme::fg(color));
    let title = truncate(title, inner.saturating_sub(2));
    let fill = inner.saturating_sub(width(&title));
    print!("{}{title}{}{}", ends.0, "─".repeat(fill), ends.1);
    print!("{}", Theme::reset());
}

/// `body` must already be exactly `inner` cells wide.
fn content_line(row: usize, left: usize, color: &str, body: &str) {
    position_cursor(row, left);
    print!("{}│{}", Theme::fg(color), Theme::reset());
    print!("{body}");
    print!("{}", Theme::reset());
    print!("{}│{}", Theme::fg(color), Theme::reset());
}

pub fn render_modal(modal: &ModalView, theme: &Theme, rows: usize, cols: usize) {
    match modal {
        ModalView::Form(form) => render_form(form, theme, rows, cols),
        ModalView::Confirm(confirm) => render_confirm(confirm, theme, rows, cols),
    }
}

fn render_form(form: &FormView, theme: &Theme, rows: usize, cols: usize) {
    let height = form.fields.len() + 5;
    let (top, left, box_width) = frame(height, rows, cols);
    let inner = box_width - 2;
    let color = &theme.colors.modal_border;

    border_line(top, left, inner, color, ('┌', '┐'), &format!(" {} ", form.title));
    content_line(top + 1, left, color, &" ".repeat(inner));

    for (idx, field) in form.fields.iter().enumerate() {
        let marker = if field.required { "*" } else { " " };
        let label = fit(&format!(" {}{marker}", field.label), LABEL_WIDTH, false);
        let value_width = inner.saturating_sub(LABEL_WIDTH + 2);

        let (value, style) = if field.value.is_empty() {
            (field.hint.clone(), format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim)))
        } else if !field.editable {
            (field.value.clone(), Theme::fg(&theme.colors.text_dim))
        } else {
            (field.value.clone(), Theme::fg(&theme.colors.text_normal))
        };

        let value = fit(&value, value_width, false);
        let body = if field.focused {
            format!(
                "{}{}{label}{} {}{}{value}{} ",
                Theme::bold(),
                Theme::fg(&theme.colors.header_fg),
                Theme::reset(),
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.selection_bg),
                Theme::reset()
            )
        } else {
            format!("{}{label}{} {style}{value}{} ", Theme::fg(&theme.colors.text_dim), Theme::reset(), Theme::reset())
        };
        content_line(top + 2 + idx, left, color, &body);
    }

    let status_row = top + 2 + form.fields.len();
    let status = match (&form.error, form.submitting) {
        (_, true) => format!("{}{}", Theme::fg(&theme.colors.info), fit(" Saving...", inner, false)),
        (Some(error), false) => format!("{}{}", Theme::fg(&theme.colors.negative), fit(&format!(" {error}"), inner, false)),
        (None, false) => " ".repeat(inner),
    };
    content_line(status_row, left, color, &status);
    content_line(status_row + 1, left, color, &" ".repeat(inner));
    border_line(status_row + 2, left, inner, color, ('└', '┘'), "");
}

fn render_confirm(confirm: &ConfirmView, theme: &Theme, rows: usize, cols: usize) {
    let (top, left, box_width) = frame(7, rows, cols);
    let inner = box_width - 2;
    let color = &theme.colors.negative;

    border_line(top, left, inner, color, ('┌', '┐'), &format!(" {} ", confirm.title));
    content_line(top + 1, left, color, &" ".repeat(inner));
    let message = format!("{}{}", Theme::fg(&theme.colors.text_normal), fit(&format!(" {}", confirm.message), inner, false));
    content_line(top + 2, left, color, &message);
    content_line(top + 3, left, color, &" ".repeat(inner));

    let prompt = if confirm.loading { " Deleting..." } else { " [y] Delete   [n] Cancel" };
    let prompt = format!("{}{}", Theme::fg(&theme.colors.text_dim), fit(prompt, inner, false));
    content_line(top + 4, left, color, &prompt);
    border_line(top + 5, left, inner, color, ('└', '┘'), "");
}
