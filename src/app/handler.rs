//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place state changes. It interprets an event in
//! the current context (open modal, then input mode, then mounted screen),
//! mutates [`AppState`] and returns the side effects to run.
//!
//! # Data loading
//!
//! ```text
//! mount ──▶ Fetch ──ok──▶ ReplaceRecords ──▶ RecordsLoaded ──▶ table (LIVE)
//!             │
//!             └─error / timeout──▶ LoadRecords ──▶ RecordsLoaded ──▶ table (DEMO)
//! ```
//!
//! Dashboard and report fetches fall back to figures derived from a worker
//! snapshot. Resources without an endpoint read the worker store directly.

use super::modes::InputMode;
use super::palette::Palette;
use super::requests::TICK_SECONDS;
use super::router::Screen;
use super::screens::ScreenState;
use crate::app::{Action, AppState};
use crate::data::{decode_records, pdf_url, DashboardMetrics, Endpoint, OperationalReport, Origin, ReportRange, SalesReport};
use crate::domain::error::{HaulboardError, Result};
use crate::domain::{Resource, Tone};
use crate::forms::{FormPhase, Modal, SubmitRejected};
use crate::worker::{WorkerMessage, WorkerResponse};
use std::collections::BTreeMap;

/// Events delivered by the plugin shim.
///
/// Keys arrive as context-free events; the handler decides what they mean.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Char(char),

    /// The host answered the permission request. Loading starts here.
    PermissionsResult {
        /// Whether web access was granted.
        granted: bool,
    },

    /// An HTTP GET issued by [`Action::Fetch`] settled.
    FetchCompleted {
        endpoint: Endpoint,
        generation: u64,
        status: u16,
        body: Vec<u8>,
    },

    /// Heartbeat timer fired.
    Tick,

    /// The URL opener finished.
    OpenerFinished {
        exit_code: Option<i32>,
        stderr: String,
    },

    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns whether to
/// re-render plus the actions to execute.
///
/// # Errors
///
/// Currently infallible in practice; the `Result` leaves room for handlers
/// that propagate store or decode failures.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventKind(event)).entered();

    let (render, mut actions) = match event {
        Event::PermissionsResult { granted } => {
            tracing::debug!(granted, "permissions resolved");
            state.started = true;
            state.online = *granted;
            if !granted {
                state.set_status("Web access denied, showing demo data", Tone::Warning);
            }
            state.remount();
            (true, load_current(state))
        }
        Event::FetchCompleted {
            endpoint,
            generation,
            status,
            body,
        } => handle_fetch(state, *endpoint, *generation, *status, body),
        Event::Tick => handle_tick(state),
        Event::OpenerFinished { exit_code, stderr } => {
            if *exit_code == Some(0) {
                state.set_status("Report PDF opened", Tone::Positive);
            } else {
                tracing::warn!(exit_code = ?exit_code, stderr = %stderr, "failed to open report PDF");
                state.set_status("Could not open the report PDF", Tone::Negative);
            }
            (true, vec![])
        }
        Event::WorkerResponse(response) => handle_worker_response(state, response.clone()),
        key => handle_key(state, key),
    };

    arm_heartbeat(state, &mut actions);
    Ok((render, actions))
}

/// Event name without payloads, for span fields.
struct EventKind<'a>(&'a Event);

impl std::fmt::Debug for EventKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::FetchCompleted { endpoint, status, .. } => write!(f, "FetchCompleted({endpoint}, {status})"),
            Event::WorkerResponse(_) => f.write_str("WorkerResponse"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Arms the heartbeat when something needs it and it is not already running.
fn arm_heartbeat(state: &mut AppState, actions: &mut Vec<Action>) {
    let needed = !state.requests.is_idle() || state.refresh_countdown.is_some();
    if needed && !state.tick_armed {
        state.tick_armed = true;
        actions.push(Action::ArmTimer(TICK_SECONDS));
    }
}

fn report_range(state: &AppState) -> ReportRange {
    match &state.screen {
        ScreenState::Reports(reports) => reports.range,
        _ => ReportRange::ending(state.today, crate::data::DEFAULT_REPORT_DAYS),
    }
}

fn fetch(state: &mut AppState, endpoint: Endpoint) -> Action {
    let generation = state.requests.issue(endpoint);
    let url = endpoint.url(&state.settings.api_base_url, &report_range(state));
    tracing::debug!(endpoint = %endpoint, url = %url, generation, "fetch issued");
    Action::Fetch {
        endpoint,
        url,
        generation,
    }
}

/// Starts loading whatever the mounted screen shows.
fn load_current(state: &mut AppState) -> Vec<Action> {
    if !state.started {
        return vec![];
    }

    let online = state.online;
    match &mut state.screen {
        ScreenState::Table(table) => {
            let resource = table.resource;
            table.loading = table.records().is_empty();
            match Endpoint::for_resource(resource).filter(|_| online) {
                Some(endpoint) => vec![fetch(state, endpoint)],
                None => {
                    table.origin = Origin::Demo;
                    vec![Action::PostToWorker(WorkerMessage::load_records(resource))]
                }
            }
        }
        ScreenState::Dashboard(dashboard) => {
            if online {
                vec![fetch(state, Endpoint::Dashboard)]
            } else {
                dashboard.awaiting_snapshot = true;
                vec![Action::PostToWorker(WorkerMessage::load_snapshot())]
            }
        }
        ScreenState::Reports(reports) => {
            reports.reset();
            if online {
                vec![fetch(state, Endpoint::SalesReport), fetch(state, Endpoint::OperationalReport)]
            } else {
                reports.sales_awaiting_snapshot = true;
                reports.operational_awaiting_snapshot = true;
                vec![Action::PostToWorker(WorkerMessage::load_snapshot())]
            }
        }
    }
}

fn navigate(state: &mut AppState, to: Screen) -> (bool, Vec<Action>) {
    if !state.router.navigate(to) {
        state.input_mode = InputMode::Normal;
        state.palette = None;
        return (true, vec![]);
    }
    state.status = None;
    state.remount();
    (true, load_current(state))
}

fn go_back(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.router.back().is_none() {
        return (false, vec![]);
    }
    state.status = None;
    state.remount();
    (true, load_current(state))
}

fn handle_fetch(state: &mut AppState, endpoint: Endpoint, generation: u64, status: u16, body: &[u8]) -> (bool, Vec<Action>) {
    if !state.requests.complete(endpoint, generation) {
        tracing::debug!(endpoint = %endpoint, generation, "stale response dropped");
        return (false, vec![]);
    }

    if !(200..300).contains(&status) {
        return fall_back(state, endpoint, &HaulboardError::Fetch(format!("HTTP {status}")));
    }

    let outcome = match endpoint {
        Endpoint::Records(resource) => decode_records(body, resource).map(|records| {
            let Some(table) = state.screen.table_for(resource) else {
                return vec![];
            };
            table.origin = Origin::Live;
            tracing::debug!(resource = %resource, count = records.len(), "live records received");
            vec![Action::PostToWorker(WorkerMessage::replace_records(resource, records))]
        }),
        Endpoint::Dashboard => DashboardMetrics::from_body(body).map(|metrics| {
            if let ScreenState::Dashboard(dashboard) = &mut state.screen {
                dashboard.metrics = Some(metrics);
                dashboard.origin = Origin::Live;
                dashboard.awaiting_snapshot = false;
            }
            vec![]
        }),
        Endpoint::SalesReport => SalesReport::from_body(body).map(|sales| {
            if let ScreenState::Reports(reports) = &mut state.screen {
                reports.sales = Some(sales);
                reports.sales_origin = Origin::Live;
            }
            vec![]
        }),
        Endpoint::OperationalReport => OperationalReport::from_body(body).map(|operational| {
            if let ScreenState::Reports(reports) = &mut state.screen {
                reports.operational = Some(operational);
                reports.operational_origin = Origin::Live;
            }
            vec![]
        }),
    };

    match outcome {
        Ok(actions) => (true, actions),
        Err(e) => fall_back(state, endpoint, &e),
    }
}

/// Logs a failed request and switches its consumer to demo data.
fn fall_back(state: &mut AppState, endpoint: Endpoint, error: &HaulboardError) -> (bool, Vec<Action>) {
    tracing::warn!(endpoint = %endpoint, error = %error, "request failed, falling back to demo data");

    let actions = match (endpoint, &mut state.screen) {
        (Endpoint::Records(resource), ScreenState::Table(table)) if table.resource == resource => {
            table.origin = Origin::Demo;
            vec![Action::PostToWorker(WorkerMessage::load_records(resource))]
        }
        (Endpoint::Dashboard, ScreenState::Dashboard(dashboard)) => {
            dashboard.awaiting_snapshot = true;
            vec![Action::PostToWorker(WorkerMessage::load_snapshot())]
        }
        (Endpoint::SalesReport, ScreenState::Reports(reports)) => {
            reports.sales_awaiting_snapshot = true;
            vec![Action::PostToWorker(WorkerMessage::load_snapshot())]
        }
        (Endpoint::OperationalReport, ScreenState::Reports(reports)) => {
            reports.operational_awaiting_snapshot = true;
            vec![Action::PostToWorker(WorkerMessage::load_snapshot())]
        }
        _ => return (false, vec![]),
    };

    state.set_status(format!("{endpoint} unavailable, showing demo data"), Tone::Warning);
    (true, actions)
}

fn handle_tick(state: &mut AppState) -> (bool, Vec<Action>) {
    state.tick_armed = false;

    let mut render = false;
    let mut actions = Vec::new();

    for endpoint in state.requests.tick() {
        let (r, a) = fall_back(state, endpoint, &HaulboardError::Fetch("request timed out".to_string()));
        render |= r;
        actions.extend(a);
    }

    if let Some(remaining) = state.refresh_countdown {
        if remaining <= 1 {
            state.refresh_countdown = Some(state.refresh_ticks());
            if state.started && state.online && !state.requests.is_pending(Endpoint::Dashboard) {
                tracing::debug!("dashboard refresh");
                actions.push(fetch(state, Endpoint::Dashboard));
            }
        } else {
            state.refresh_countdown = Some(remaining - 1);
        }
    }

    (render, actions)
}

fn snapshot_map(collections: Vec<(Resource, Vec<crate::domain::Record>)>) -> BTreeMap<Resource, Vec<crate::domain::Record>> {
    collections.into_iter().collect()
}

fn handle_worker_response(state: &mut AppState, response: WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::RecordsLoaded { resource, records } => {
            let Some(table) = state.screen.table_for(resource) else {
                tracing::debug!(resource = %resource, "records for an unmounted screen ignored");
                return (false, vec![]);
            };
            let origin = table.origin;
            table.set_records(records, origin);
            (true, vec![])
        }
        WorkerResponse::SnapshotLoaded { collections } => {
            let snapshot = snapshot_map(collections);
            match &mut state.screen {
                ScreenState::Dashboard(dashboard) => dashboard.apply_snapshot(&snapshot),
                ScreenState::Reports(reports) => reports.apply_snapshot(&snapshot),
                ScreenState::Table(_) => return (false, vec![]),
            }
            (true, vec![])
        }
        WorkerResponse::RecordSaved { resource, record, ticket } => {
            let Some(table) = state.screen.table_for(resource) else {
                return (false, vec![]);
            };
            let id = record.id.clone();
            table.apply_saved(record);
            if matches!(&table.modal, Modal::Form(form) if form.awaits(ticket)) {
                table.modal = Modal::Closed;
            }
            state.set_status(format!("Saved {id}"), Tone::Positive);
            (true, vec![])
        }
        WorkerResponse::SaveRejected { resource, message, ticket } => {
            tracing::warn!(resource = %resource, message = %message, ticket, "save failed");
            if let Some(table) = state.screen.table_for(resource) {
                if let Modal::Form(form) = &mut table.modal {
                    if form.awaits(ticket) {
                        form.submit_failed(message);
                        return (true, vec![]);
                    }
                }
            }
            state.set_status(message, Tone::Negative);
            (true, vec![])
        }
        WorkerResponse::RecordDeleted { resource, id } => {
            let Some(table) = state.screen.table_for(resource) else {
                return (false, vec![]);
            };
            table.apply_deleted(&id);
            if matches!(table.modal, Modal::Confirm(_)) {
                table.modal = Modal::Closed;
            }
            state.set_status(format!("Deleted {id}"), Tone::Positive);
            (true, vec![])
        }
        WorkerResponse::DeleteRejected { resource, id, message } => {
            tracing::warn!(resource = %resource, id = %id, message = %message, "delete failed");
            if let Some(table) = state.screen.table_for(resource) {
                if let Modal::Confirm(confirm) = &mut table.modal {
                    confirm.set_loading(false);
                }
            }
            state.set_status(message, Tone::Negative);
            (true, vec![])
        }
        WorkerResponse::Error { message } => {
            tracing::warn!(message = %message, "worker error");
            if let Some(table) = state.screen.table_mut() {
                table.loading = false;
                match &mut table.modal {
                    Modal::Form(form) if form.phase == FormPhase::Submitting => form.submit_failed(message.clone()),
                    Modal::Form(_) => {}
                    Modal::Confirm(confirm) => confirm.set_loading(false),
                    Modal::Closed => {}
                }
            }
            state.set_status(message, Tone::Negative);
            (true, vec![])
        }
    }
}

fn handle_key(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    if state.screen.table().is_some_and(|t| t.modal.is_open()) {
        return handle_modal_key(state, event);
    }

    match state.input_mode {
        InputMode::Palette => handle_palette_key(state, event),
        InputMode::Search => handle_search_key(state, event),
        InputMode::Filter => handle_filter_key(state, event),
        InputMode::Normal => handle_normal_key(state, event),
    }
}

fn handle_modal_key(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let Some(table) = state.screen.table_mut() else {
        return (false, vec![]);
    };

    match &mut table.modal {
        Modal::Closed => (false, vec![]),
        Modal::Form(form) => match event {
            Event::Escape => {
                if form.phase == FormPhase::Submitting {
                    tracing::debug!("form closed while a save is in flight");
                }
                table.modal = Modal::Closed;
                (true, vec![])
            }
            Event::Tab | Event::Down => {
                form.focus_next();
                (true, vec![])
            }
            Event::BackTab | Event::Up => {
                form.focus_previous();
                (true, vec![])
            }
            Event::Left => (form.cycle_option(false), vec![]),
            Event::Right => (form.cycle_option(true), vec![]),
            Event::Backspace => (form.backspace(), vec![]),
            Event::Char(c) => (form.input_char(*c), vec![]),
            Event::Enter => match form.begin_submit(state.last_ticket + 1) {
                Ok(submission) => {
                    state.last_ticket = submission.ticket;
                    tracing::debug!(
                        resource = %submission.resource,
                        mode = ?submission.mode,
                        ticket = submission.ticket,
                        "form submitted"
                    );
                    (
                        true,
                        vec![Action::PostToWorker(WorkerMessage::save_record(
                            submission.resource,
                            submission.mode,
                            submission.values,
                            submission.ticket,
                        ))],
                    )
                }
                Err(SubmitRejected::Busy) => (false, vec![]),
                Err(SubmitRejected::Invalid(e)) => {
                    tracing::debug!(error = %e, "form invalid");
                    (true, vec![])
                }
            },
            _ => (false, vec![]),
        },
        Modal::Confirm(confirm) => match event {
            Event::Char('y') | Event::Enter => match confirm.confirm() {
                Some(intent) => (
                    true,
                    vec![Action::PostToWorker(WorkerMessage::delete_record(intent.resource, intent.id))],
                ),
                None => (false, vec![]),
            },
            Event::Char('n') | Event::Escape if confirm.can_cancel() => {
                table.modal = Modal::Closed;
                (true, vec![])
            }
            _ => (false, vec![]),
        },
    }
}

fn handle_palette_key(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let Some(palette) = state.palette.as_mut() else {
        state.input_mode = InputMode::Normal;
        return (true, vec![]);
    };

    match event {
        Event::Escape => {
            state.palette = None;
            state.input_mode = InputMode::Normal;
            (true, vec![])
        }
        Event::Enter => match palette.selected_screen() {
            Some(screen) => navigate(state, screen),
            None => (false, vec![]),
        },
        Event::Down | Event::Tab => {
            palette.move_down();
            (true, vec![])
        }
        Event::Up | Event::BackTab => {
            palette.move_up();
            (true, vec![])
        }
        Event::Backspace => {
            palette.pop();
            (true, vec![])
        }
        Event::Char(c) => {
            palette.push(*c);
            (true, vec![])
        }
        _ => (false, vec![]),
    }
}

fn handle_search_key(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let Some(table) = state.screen.table_mut() else {
        state.input_mode = InputMode::Normal;
        return (true, vec![]);
    };

    match event {
        Event::Char(c) => {
            table.push_search(*c);
            tracing::trace!(query = %table.filter.search_term, "search term updated");
        }
        Event::Backspace => table.pop_search(),
        Event::Down => table.cursor_down(),
        Event::Up => table.cursor_up(),
        Event::Enter => state.input_mode = InputMode::Normal,
        Event::Escape => {
            table.clear_search();
            state.input_mode = InputMode::Normal;
        }
        _ => return (false, vec![]),
    }
    (true, vec![])
}

fn handle_filter_key(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let Some(table) = state.screen.table_mut() else {
        state.input_mode = InputMode::Normal;
        return (true, vec![]);
    };

    match event {
        Event::Tab => table.focus_next_filter(),
        Event::Right | Event::Char('l') => table.cycle_focused_filter(true),
        Event::Left | Event::Char('h') => table.cycle_focused_filter(false),
        Event::Enter | Event::Escape | Event::Char('f') => state.input_mode = InputMode::Normal,
        _ => return (false, vec![]),
    }
    (true, vec![])
}

fn handle_normal_key(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    match event {
        Event::Char('q') => return (false, vec![Action::CloseFocus]),
        Event::Tab | Event::BackTab => {
            let next = state.router.current().step(*event == Event::Tab);
            return navigate(state, next);
        }
        Event::Char('b') | Event::Backspace => return go_back(state),
        Event::Char('g' | ':') => {
            state.palette = Some(Palette::new());
            state.input_mode = InputMode::Palette;
            return (true, vec![]);
        }
        Event::Char('r') => {
            state.status = None;
            if matches!(state.screen, ScreenState::Dashboard(_)) {
                state.refresh_countdown = Some(state.refresh_ticks());
            }
            return (true, load_current(state));
        }
        _ => {}
    }

    match &mut state.screen {
        ScreenState::Table(table) => match event {
            Event::Down | Event::Char('j') => table.cursor_down(),
            Event::Up | Event::Char('k') => table.cursor_up(),
            Event::Right | Event::Char('l' | ']') => return (table.next_page(), vec![]),
            Event::Left | Event::Char('h' | '[') => return (table.previous_page(), vec![]),
            Event::Char('/') => state.input_mode = InputMode::Search,
            Event::Char('f') if !table.spec.filters.is_empty() => state.input_mode = InputMode::Filter,
            Event::Char('n') => table.open_create(),
            Event::Enter | Event::Char('e') => return (table.open_edit(), vec![]),
            Event::Char('d') => return (table.open_delete(), vec![]),
            Event::Escape => table.clear_search(),
            _ => return (false, vec![]),
        },
        ScreenState::Reports(reports) => match event {
            Event::Left | Event::Char('[') | Event::Right | Event::Char(']') => {
                let forward = matches!(event, Event::Right | Event::Char(']'));
                if !reports.range.shift(forward, state.today) {
                    state.set_status("Reports cannot extend past today", Tone::Info);
                    return (true, vec![]);
                }
                tracing::debug!(range = %reports.range, "report range shifted");
                return (true, load_current(state));
            }
            Event::Char('p') => {
                let url = pdf_url(&state.settings.api_base_url, &reports.range);
                tracing::debug!(url = %url, "opening report PDF");
                return (false, vec![Action::OpenUrl(url)]);
            }
            _ => return (false, vec![]),
        },
        ScreenState::Dashboard(_) => return (false, vec![]),
    }
    (true, vec![])
}
