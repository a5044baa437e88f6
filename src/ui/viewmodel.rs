//! View model types representing renderable UI state.
//!
//! View models are computed by [`crate::app::AppState::compute_viewmodel`] and
//! consumed by the renderer. They hold display-ready strings and flags only;
//! every decision about what is visible has already been made.

use crate::domain::Tone;

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Search input, shown while searching or while a search term is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Categorical filter chips of a table screen.
    pub filter_chips: Vec<FilterChip>,

    pub body: Body,

    pub footer: FooterInfo,

    /// Form or confirm dialog drawn over the body.
    pub modal: Option<ModalView>,

    /// "Go to screen" overlay.
    pub palette: Option<PaletteView>,
}

/// Title bar.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,

    /// Data origin badge ("LIVE" / "DEMO"), absent while loading.
    pub badge: Option<Badge>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

/// Help line plus an optional transient status message.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
    pub status: Option<StatusInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub message: String,
    pub tone: Tone,
}

#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
    /// Whether keystrokes currently go to the query.
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub label: String,
    /// Selected option, `"all"` when unconstrained.
    pub value: String,
    pub focused: bool,
}

/// Main content area.
#[derive(Debug, Clone)]
pub enum Body {
    /// Data has not arrived yet.
    Loading(String),
    Empty(EmptyState),
    Table(TableView),
    Tiles(TilesView),
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone)]
pub struct TableView {
    pub columns: Vec<ColumnView>,
    pub rows: Vec<RowView>,
    pub pager: PagerInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub title: String,
    pub width: usize,
    pub align_right: bool,
}

#[derive(Debug, Clone)]
pub struct RowView {
    pub cells: Vec<CellView>,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub text: String,
    /// Status cells are tinted by tone.
    pub tone: Option<Tone>,
}

/// "Page 2 of 5 · 41–50 of 93".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerInfo {
    pub page: usize,
    pub total_pages: usize,
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

/// Metric tiles grouped into titled sections.
#[derive(Debug, Clone)]
pub struct TilesView {
    /// Line under the header, e.g. the report range.
    pub caption: Option<String>,
    pub sections: Vec<TileSection>,
}

#[derive(Debug, Clone)]
pub struct TileSection {
    pub title: String,
    pub tiles: Vec<TileView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub enum ModalView {
    Form(FormView),
    Confirm(ConfirmView),
}

#[derive(Debug, Clone)]
pub struct FormView {
    pub title: String,
    pub fields: Vec<FieldView>,
    pub error: Option<String>,
    pub submitting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: String,
    pub value: String,
    /// Input hint, e.g. `YYYY-MM-DD` or `◀ ▶`.
    pub hint: String,
    pub required: bool,
    pub editable: bool,
    pub focused: bool,
}

#[derive(Debug, Clone)]
pub struct ConfirmView {
    pub title: String,
    pub message: String,
    pub loading: bool,
}

#[derive(Debug, Clone)]
pub struct PaletteView {
    pub query: String,
    pub items: Vec<PaletteItem>,
}

#[derive(Debug, Clone)]
pub struct PaletteItem {
    pub title: String,
    /// Character ranges to highlight, `(start, end)` exclusive.
    pub highlight: Vec<(usize, usize)>,
    pub is_selected: bool,
}
