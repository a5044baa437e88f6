//! Top-level rendering entry point.

use crate::app::AppState;
use crate::ui::components;

/// Computes the view model for the frame and prints it.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_screen(&viewmodel, &state.theme, cols, rows);
}
