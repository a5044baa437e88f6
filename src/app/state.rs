//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for everything on screen: the
//! router, the mounted screen's local state, the input mode, in-flight
//! requests and the transient status line. View models are computed on demand
//! from a state snapshot; nothing in here prints.

use super::modes::InputMode;
use super::palette::Palette;
use super::requests::{ticks_for, Requests};
use super::router::{Router, Screen};
use super::screens::{DashboardState, ReportsState, ScreenState};
use super::table::TableState;
use crate::data::{ColumnStyle, Origin, Tile, DEFAULT_BASE_URL};
use crate::domain::{humanize, Record, Status, Tone};
use crate::forms::{FieldKind, FormPhase, Modal};
use crate::query::ALL;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Badge, Body, CellView, ColumnView, ConfirmView, EmptyState, FieldView, FilterChip, FooterInfo, FormView,
    HeaderInfo, ModalView, PagerInfo, PaletteItem, PaletteView, RowView, SearchBarInfo, StatusInfo, TableView,
    TileSection, TileView, TilesView, UIViewModel,
};
use chrono::NaiveDate;
use std::num::NonZeroUsize;
use std::time::Duration;

/// Runtime settings derived from the plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub page_size: NonZeroUsize,
    /// Dashboard polling period.
    pub refresh_interval: Duration,
    /// Deadline for each HTTP GET.
    pub request_timeout: Duration,
    pub start_screen: Screen,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            page_size: NonZeroUsize::MIN.saturating_add(9),
            refresh_interval: Duration::from_secs(30),
            request_timeout: Duration::from_secs(10),
            start_screen: Screen::Dashboard,
        }
    }
}

/// Transient one-line message shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub tone: Tone,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub router: Router,
    /// Local state of the mounted screen.
    pub screen: ScreenState,
    pub input_mode: InputMode,
    /// Present while [`InputMode::Palette`] is active.
    pub palette: Option<Palette>,
    pub requests: Requests,
    /// Anchor for report ranges.
    pub today: NaiveDate,
    pub theme: Theme,
    pub status: Option<StatusLine>,
    /// Set once the host answered the permission request.
    pub started: bool,
    /// Whether web access was granted; without it every screen shows demo data.
    pub online: bool,
    /// Ticks left until the next dashboard poll, while the dashboard is mounted.
    pub refresh_countdown: Option<u32>,
    /// Whether a heartbeat timer is currently armed.
    pub tick_armed: bool,
    /// Last ticket handed to a form submit.
    pub last_ticket: u64,
}

impl AppState {
    /// Creates the state with the start screen mounted but nothing requested.
    ///
    /// Loading begins once [`crate::app::Event::PermissionsResult`] arrives.
    #[must_use]
    pub fn new(settings: Settings, theme: Theme, today: NaiveDate) -> Self {
        let start = settings.start_screen;
        Self {
            screen: ScreenState::mount(start, settings.page_size, today),
            router: Router::new(start),
            requests: Requests::new(settings.request_timeout),
            input_mode: InputMode::Normal,
            palette: None,
            today,
            theme,
            status: None,
            started: false,
            online: false,
            refresh_countdown: None,
            tick_armed: false,
            last_ticket: 0,
            settings,
        }
    }

    /// Ticks between dashboard polls.
    #[must_use]
    pub fn refresh_ticks(&self) -> u32 {
        ticks_for(self.settings.refresh_interval)
    }

    /// Replaces the screen state with a fresh one for the router's current screen.
    ///
    /// Pending requests belong to the old screen and are cancelled.
    pub fn remount(&mut self) {
        let screen = self.router.current();
        self.requests.cancel_all();
        self.screen = ScreenState::mount(screen, self.settings.page_size, self.today);
        self.input_mode = InputMode::Normal;
        self.palette = None;
        self.refresh_countdown = (screen == Screen::Dashboard).then(|| self.refresh_ticks());
    }

    pub fn set_status(&mut self, message: impl Into<String>, tone: Tone) {
        self.status = Some(StatusLine {
            message: message.into(),
            tone,
        });
    }

    /// Computes the view model for a `rows` × `cols` frame.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let (body, search_bar, filter_chips, modal) = match &self.screen {
            ScreenState::Dashboard(dashboard) => (Self::dashboard_body(dashboard), None, vec![], None),
            ScreenState::Reports(reports) => (Self::reports_body(reports), None, vec![], None),
            ScreenState::Table(table) => (
                self.table_body(table, rows, cols),
                self.compute_search_bar(table),
                self.compute_filter_chips(table),
                Self::compute_modal(&table.modal),
            ),
        };

        UIViewModel {
            header: self.compute_header(),
            search_bar,
            filter_chips,
            body,
            footer: self.compute_footer(),
            modal,
            palette: self.compute_palette(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let screen = self.router.current();
        let (origin, count) = match &self.screen {
            ScreenState::Dashboard(d) => (d.metrics.as_ref().map(|_| d.origin), None),
            ScreenState::Reports(r) => ((!r.is_loading()).then(|| r.origin()), None),
            ScreenState::Table(t) => ((!t.loading).then_some(t.origin), (!t.loading).then(|| t.filtered().len())),
        };

        let title = match count {
            Some(count) => format!(" {} ({count}) ", screen.title()),
            None => format!(" {} ", screen.title()),
        };

        let badge = origin.map(|origin| match origin {
            Origin::Live => Badge {
                label: "LIVE".to_string(),
                tone: Tone::Positive,
            },
            Origin::Demo => Badge {
                label: "DEMO".to_string(),
                tone: Tone::Warning,
            },
        });

        HeaderInfo { title, badge }
    }

    fn compute_footer(&self) -> FooterInfo {
        let modal_open = self.screen.table().is_some_and(|t| t.modal.is_open());

        let keybindings = if modal_open {
            match self.screen.table().map(|t| &t.modal) {
                Some(Modal::Confirm(_)) => "y/Enter: confirm  n/Esc: cancel",
                _ => "Tab/Shift+Tab: field  ←/→: choose  Enter: save  Esc: close",
            }
        } else {
            match (self.input_mode, &self.screen) {
                (InputMode::Palette, _) => "Type to filter  ↑/↓: select  Enter: go  Esc: close",
                (InputMode::Search, _) => "Type to search  ↑/↓: move  Enter: done  Esc: clear",
                (InputMode::Filter, _) => "Tab: next filter  ←/→: change  Enter/Esc: done",
                (InputMode::Normal, ScreenState::Table(_)) => {
                    "j/k: move  h/l: page  /: search  f: filter  n: new  e: edit  d: delete  g: go  q: quit"
                }
                (InputMode::Normal, ScreenState::Reports(_)) => {
                    "[/]: shift range  p: PDF  r: reload  Tab: next  g: go  b: back  q: quit"
                }
                (InputMode::Normal, ScreenState::Dashboard(_)) => {
                    "r: refresh  Tab: next screen  g: go to  b: back  q: quit"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
            status: self.status.as_ref().map(|s| StatusInfo {
                message: s.message.clone(),
                tone: s.tone,
            }),
        }
    }

    fn compute_search_bar(&self, table: &TableState) -> Option<SearchBarInfo> {
        let focused = self.input_mode == InputMode::Search;
        (focused || !table.filter.search_term.is_empty()).then(|| SearchBarInfo {
            query: table.filter.search_term.clone(),
            focused,
        })
    }

    fn compute_filter_chips(&self, table: &TableState) -> Vec<FilterChip> {
        table
            .spec
            .filters
            .iter()
            .enumerate()
            .map(|(idx, filter)| FilterChip {
                label: filter.label.to_string(),
                value: table
                    .filter
                    .selection(filter.name)
                    .value()
                    .map_or_else(|| ALL.to_string(), humanize),
                focused: self.input_mode == InputMode::Filter && idx == table.filter_focus,
            })
            .collect()
    }

    fn compute_palette(&self) -> Option<PaletteView> {
        let palette = self.palette.as_ref()?;
        Some(PaletteView {
            query: palette.query.clone(),
            items: palette
                .matches()
                .iter()
                .enumerate()
                .map(|(idx, m)| PaletteItem {
                    title: m.screen.title().to_string(),
                    highlight: m.highlight.clone(),
                    is_selected: idx == palette.selected,
                })
                .collect(),
        })
    }

    fn compute_modal(modal: &Modal) -> Option<ModalView> {
        match modal {
            Modal::Closed => None,
            Modal::Form(form) => Some(ModalView::Form(FormView {
                title: form.title(),
                fields: form
                    .fields
                    .iter()
                    .enumerate()
                    .map(|(idx, field)| {
                        let raw = form.value(field.name);
                        let value = match field.kind {
                            FieldKind::Select(_) if !raw.is_empty() => humanize(raw),
                            _ => raw.to_string(),
                        };
                        FieldView {
                            label: field.label.to_string(),
                            value,
                            hint: field.kind.hint().to_string(),
                            required: field.required,
                            editable: field.is_editable(),
                            focused: idx == form.focus,
                        }
                    })
                    .collect(),
                error: form.error.clone(),
                submitting: form.phase == FormPhase::Submitting,
            })),
            Modal::Confirm(confirm) => Some(ModalView::Confirm(ConfirmView {
                title: format!("Delete {}?", confirm.intent.resource.singular()),
                message: confirm.message.clone(),
                loading: confirm.loading,
            })),
        }
    }

    fn dashboard_body(dashboard: &DashboardState) -> Body {
        dashboard.metrics.as_ref().map_or_else(
            || Body::Loading("Loading dashboard...".to_string()),
            |metrics| {
                Body::Tiles(TilesView {
                    caption: None,
                    sections: vec![tile_section("Overview", &metrics.tiles())],
                })
            },
        )
    }

    fn reports_body(reports: &ReportsState) -> Body {
        if reports.is_loading() {
            return Body::Loading(format!("Loading reports for {}...", reports.range));
        }

        let mut sections = Vec::new();
        if let Some(sales) = &reports.sales {
            sections.push(tile_section("Sales", &sales.tiles()));
        }
        if let Some(operational) = &reports.operational {
            sections.push(tile_section("Operations", &operational.tiles()));
        }

        Body::Tiles(TilesView {
            caption: Some(format!("{} ({} days)", reports.range, reports.range.days())),
            sections,
        })
    }

    /// Table body: visible columns, the current page's rows and the pager.
    ///
    /// Columns are dropped from the right until the rest fit in `cols`; the
    /// page itself is never windowed since page sizes are small.
    fn table_body(&self, table: &TableState, rows: usize, cols: usize) -> Body {
        if table.loading {
            return Body::Loading(format!("Loading {}...", table.resource.title().to_lowercase()));
        }

        if table.filtered().is_empty() {
            let (message, subtitle) = if table.records().is_empty() {
                (
                    format!("No {} yet", table.resource.title().to_lowercase()),
                    "Press n to create one".to_string(),
                )
            } else {
                (
                    "No records match the current filters".to_string(),
                    "Esc clears the search, f edits filters".to_string(),
                )
            };
            return Body::Empty(EmptyState { message, subtitle });
        }

        let mut used = 0;
        let columns: Vec<_> = table
            .spec
            .columns
            .iter()
            .take_while(|c| {
                used += c.width + 1;
                used <= cols.max(1) || used == c.width + 1
            })
            .collect();

        let page = table.current_page();
        let visible_rows = self.available_rows(rows).max(1);
        let rows = page
            .items
            .iter()
            .enumerate()
            .take(visible_rows)
            .map(|(idx, record)| RowView {
                cells: columns.iter().map(|c| cell(record, c.field, c.style)).collect(),
                is_selected: idx == table.cursor,
            })
            .collect();

        let size = table.page.page_size.get();
        let total = table.filtered().len();
        let first = (page.page - 1) * size + 1;

        Body::Table(TableView {
            columns: columns
                .iter()
                .map(|c| ColumnView {
                    title: c.title.to_string(),
                    width: c.width,
                    align_right: c.style == ColumnStyle::Number,
                })
                .collect(),
            rows,
            pager: PagerInfo {
                page: page.page,
                total_pages: page.total_pages,
                first,
                last: first + page.items.len() - 1,
                total,
            },
        })
    }

    /// Rows left for table rows after the header, borders, chips, search bar,
    /// column titles, pager and footer.
    fn available_rows(&self, total_rows: usize) -> usize {
        let searching = self
            .screen
            .table()
            .is_some_and(|t| self.input_mode == InputMode::Search || !t.filter.search_term.is_empty());
        let chrome = if searching { 11 } else { 8 };
        total_rows.saturating_sub(chrome)
    }
}

fn tile_section(title: &str, tiles: &[Tile]) -> TileSection {
    TileSection {
        title: title.to_string(),
        tiles: tiles
            .iter()
            .map(|t| TileView {
                label: t.label.to_string(),
                value: t.display_value(),
            })
            .collect(),
    }
}

fn cell(record: &Record, field: &str, style: ColumnStyle) -> CellView {
    let raw = record.text(field);
    match style {
        ColumnStyle::Status => match raw.parse::<Status>() {
            Ok(status) => CellView {
                text: status.label().to_string(),
                tone: Some(status.tone()),
            },
            Err(_) => CellView {
                text: humanize(&raw),
                tone: Some(Tone::Neutral),
            },
        },
        ColumnStyle::Number => CellView {
            text: raw.parse::<f64>().map_or(raw, crate::data::metrics::group_thousands),
            tone: None,
        },
        ColumnStyle::Plain => CellView { text: raw, tone: None },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo_records;
    use crate::domain::Resource;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn customers_state() -> AppState {
        let settings = Settings {
            start_screen: Screen::Table(Resource::Customers),
            ..Settings::default()
        };
        let mut state = AppState::new(settings, Theme::default(), today());
        if let Some(table) = state.screen.table_mut() {
            table.set_records(demo_records(Resource::Customers).unwrap(), Origin::Demo);
        }
        state
    }

    #[test]
    fn default_settings_page_ten_rows() {
        assert_eq!(Settings::default().page_size.get(), 10);
    }

    #[test]
    fn loading_table_has_no_badge() {
        let settings = Settings {
            start_screen: Screen::Table(Resource::Drivers),
            ..Settings::default()
        };
        let state = AppState::new(settings, Theme::default(), today());
        let vm = state.compute_viewmodel(24, 120);
        assert!(vm.header.badge.is_none());
        assert!(matches!(vm.body, Body::Loading(_)));
    }

    #[test]
    fn table_viewmodel_shows_page_and_demo_badge() {
        let state = customers_state();
        let vm = state.compute_viewmodel(24, 200);

        assert_eq!(vm.header.title, " Customers (4) ");
        assert_eq!(vm.header.badge.map(|b| b.label), Some("DEMO".to_string()));
        let Body::Table(table) = vm.body else {
            panic!("expected a table body");
        };
        assert_eq!(table.rows.len(), 4);
        assert!(table.rows[0].is_selected);
        assert_eq!(table.pager, PagerInfo { page: 1, total_pages: 1, first: 1, last: 4, total: 4 });
        assert_eq!(vm.filter_chips.len(), 2);
        assert!(vm.filter_chips.iter().all(|c| c.value == "all"));
    }

    #[test]
    fn status_cells_carry_labels_and_tones() {
        let state = customers_state();
        let Body::Table(table) = state.compute_viewmodel(24, 200).body else {
            panic!("expected a table body");
        };
        let status_idx = table.columns.iter().position(|c| c.title == "STATUS").unwrap();
        let cell = &table.rows[0].cells[status_idx];
        assert_eq!(cell.text, "Active");
        assert_eq!(cell.tone, Some(Tone::Positive));
    }

    #[test]
    fn narrow_frames_drop_trailing_columns() {
        let state = customers_state();
        let Body::Table(wide) = state.compute_viewmodel(24, 400).body else {
            panic!("expected a table body");
        };
        let Body::Table(narrow) = state.compute_viewmodel(24, 30).body else {
            panic!("expected a table body");
        };
        assert!(narrow.columns.len() < wide.columns.len());
        assert!(!narrow.columns.is_empty());
    }

    #[test]
    fn unmatched_search_shows_empty_state() {
        let mut state = customers_state();
        if let Some(table) = state.screen.table_mut() {
            for c in "no such customer".chars() {
                table.push_search(c);
            }
        }
        let vm = state.compute_viewmodel(24, 120);
        let Body::Empty(empty) = vm.body else {
            panic!("expected the empty state");
        };
        assert_eq!(empty.message, "No records match the current filters");
        assert!(vm.search_bar.is_some());
    }

    #[test]
    fn remount_on_dashboard_starts_the_refresh_countdown() {
        let mut state = customers_state();
        state.router.navigate(Screen::Dashboard);
        state.remount();
        assert_eq!(state.refresh_countdown, Some(30));
        assert!(matches!(state.screen, ScreenState::Dashboard(_)));
    }
}
