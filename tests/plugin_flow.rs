//! Drives the event handler end to end, with the worker answering in-process.

use haulboard::app::screens::ScreenState;
use haulboard::data::{Endpoint, Origin};
use haulboard::domain::Tone;
use haulboard::forms::Modal;
use haulboard::ui::{Body, UIViewModel};
use haulboard::worker::HaulboardWorker;
use haulboard::{handle_event, initialize, Action, AppState, Config, Event, Resource, Screen};

struct Harness {
    state: AppState,
    worker: HaulboardWorker,
    /// Fetches the test has not answered yet.
    fetches: Vec<(Endpoint, u64)>,
}

impl Harness {
    fn start(screen: Screen, online: bool) -> Self {
        let config = Config {
            start_screen: screen,
            ..Config::default()
        };
        let mut harness = Self {
            state: initialize(&config),
            worker: HaulboardWorker::default(),
            fetches: Vec::new(),
        };
        harness.send(Event::PermissionsResult { granted: online });
        harness
    }

    /// Handles `event` and runs worker round-trips until quiet.
    fn send(&mut self, event: Event) -> Vec<Action> {
        let (_, actions) = handle_event(&mut self.state, &event).unwrap();
        let mut follow_up = Vec::new();
        for action in &actions {
            match action {
                Action::PostToWorker(message) => {
                    let response = self.worker.handle_message(message.clone());
                    follow_up.push(Event::WorkerResponse(response));
                }
                Action::Fetch { endpoint, generation, .. } => self.fetches.push((*endpoint, *generation)),
                _ => {}
            }
        }
        for event in follow_up {
            self.send(event);
        }
        actions
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send(Event::Char(c));
        }
    }

    fn complete(&mut self, endpoint: Endpoint, status: u16, body: &str) -> Vec<Action> {
        let index = self.fetches.iter().position(|(e, _)| *e == endpoint).expect("fetch issued");
        let (_, generation) = self.fetches.remove(index);
        self.send(Event::FetchCompleted {
            endpoint,
            generation,
            status,
            body: body.as_bytes().to_vec(),
        })
    }

    fn viewmodel(&self) -> UIViewModel {
        self.state.compute_viewmodel(40, 140)
    }

    fn visible_codes(&self) -> Vec<String> {
        match self.viewmodel().body {
            Body::Table(table) => table.rows.iter().map(|row| row.cells[0].text.clone()).collect(),
            other => panic!("expected a table, got {other:?}"),
        }
    }

    fn table_origin(&self) -> Origin {
        self.state.screen.table().expect("table mounted").origin
    }
}

#[test]
fn offline_customers_show_demo_records() {
    let h = Harness::start(Screen::Table(Resource::Customers), false);

    assert_eq!(h.visible_codes(), ["CUST-001", "CUST-002", "CUST-003", "CUST-004"]);
    assert_eq!(h.table_origin(), Origin::Demo);
    assert!(h.fetches.is_empty());
    assert_eq!(h.state.status.as_ref().map(|s| s.tone), Some(Tone::Warning));
}

#[test]
fn search_narrows_rows_and_escape_restores_them() {
    let mut h = Harness::start(Screen::Table(Resource::Customers), false);

    h.send(Event::Char('/'));
    h.type_text("BUDI");
    assert_eq!(h.visible_codes(), ["CUST-001"]);

    h.send(Event::Escape);
    assert_eq!(h.visible_codes().len(), 4);
}

#[test]
fn categorical_filter_keeps_only_matching_type() {
    let mut h = Harness::start(Screen::Table(Resource::Customers), false);

    h.send(Event::Char('f'));
    h.send(Event::Right);
    assert_eq!(h.visible_codes(), ["CUST-001", "CUST-003"]);

    let chips = h.viewmodel().filter_chips;
    assert!(chips.iter().any(|chip| chip.value.to_lowercase().contains("corporate")));
}

#[test]
fn failed_fetch_falls_back_to_demo_data() {
    let mut h = Harness::start(Screen::Table(Resource::Customers), true);
    let endpoint = Endpoint::Records(Resource::Customers);
    assert_eq!(h.fetches.len(), 1);

    h.complete(endpoint, 500, "{\"success\":false}");

    assert_eq!(h.visible_codes().len(), 4);
    assert_eq!(h.table_origin(), Origin::Demo);
    let status = h.state.status.as_ref().expect("fallback status");
    assert_eq!(status.tone, Tone::Warning);
}

#[test]
fn live_records_replace_the_demo_set() {
    let mut h = Harness::start(Screen::Table(Resource::Customers), true);
    let body = r#"{"success":true,"data":[
        {"code":"CUST-101","name":"PT Samudra","contact":"Rina","type":"corporate","city":"Medan","status":"active"}
    ]}"#;

    h.complete(Endpoint::Records(Resource::Customers), 200, body);

    assert_eq!(h.visible_codes(), ["CUST-101"]);
    assert_eq!(h.table_origin(), Origin::Live);
}

#[test]
fn response_for_a_left_screen_is_dropped() {
    let mut h = Harness::start(Screen::Table(Resource::Customers), true);
    let (endpoint, generation) = h.fetches[0];

    h.send(Event::Tab);
    let (render, actions) = handle_event(
        &mut h.state,
        &Event::FetchCompleted {
            endpoint,
            generation,
            status: 200,
            body: b"{\"success\":true,\"data\":[]}".to_vec(),
        },
    )
    .unwrap();

    assert!(!render);
    assert!(actions.is_empty());
    assert_ne!(h.state.router.current(), Screen::Table(Resource::Customers));
}

#[test]
fn confirmed_delete_removes_the_selected_record() {
    let mut h = Harness::start(Screen::Table(Resource::Customers), false);

    h.send(Event::Down);
    h.send(Event::Char('d'));
    assert!(matches!(h.state.screen.table().unwrap().modal, Modal::Confirm(_)));

    h.send(Event::Char('y'));

    assert_eq!(h.visible_codes(), ["CUST-001", "CUST-003", "CUST-004"]);
    assert!(!h.state.screen.table().unwrap().modal.is_open());
}

#[test]
fn cancelled_delete_keeps_every_record() {
    let mut h = Harness::start(Screen::Table(Resource::Customers), false);

    h.send(Event::Char('d'));
    h.send(Event::Escape);

    assert_eq!(h.visible_codes().len(), 4);
    assert!(!h.state.screen.table().unwrap().modal.is_open());
}

#[test]
fn empty_create_form_is_not_submitted() {
    let mut h = Harness::start(Screen::Table(Resource::Customers), false);

    h.send(Event::Char('n'));
    let actions = h.send(Event::Enter);

    assert!(actions.iter().all(|a| !matches!(a, Action::PostToWorker(_))));
    match &h.state.screen.table().unwrap().modal {
        Modal::Form(form) => assert!(form.error.is_some()),
        other => panic!("form should stay open, got {other:?}"),
    }
}

#[test]
fn filled_create_form_saves_a_new_coded_record() {
    let mut h = Harness::start(Screen::Table(Resource::Customers), false);

    h.send(Event::Char('n'));
    h.send(Event::Tab);
    h.type_text("CV Sinar Abadi");
    h.send(Event::Tab);
    h.type_text("Dewi Lestari");
    h.send(Event::Tab);
    h.send(Event::Tab);
    h.send(Event::Tab);
    h.send(Event::Right);
    h.send(Event::Tab);
    h.type_text("Bandung");
    h.send(Event::Tab);
    h.send(Event::Right);

    let actions = h.send(Event::Enter);

    assert!(actions.iter().any(|a| matches!(a, Action::PostToWorker(_))));
    assert!(!h.state.screen.table().unwrap().modal.is_open());
    assert_eq!(h.visible_codes(), ["CUST-001", "CUST-002", "CUST-003", "CUST-004", "CUST-005"]);

    let status = h.state.status.as_ref().expect("save status");
    assert!(status.message.starts_with("Saved CUST-005"), "{}", status.message);
    assert_eq!(status.tone, Tone::Positive);

    let saved = h.state.screen.table().unwrap().records().last().cloned().unwrap();
    assert_eq!(saved.text("name"), "CV Sinar Abadi");
    assert_eq!(saved.text("type"), "corporate");
    assert_eq!(saved.text("status"), "active");
}

#[test]
fn edited_record_replaces_its_row() {
    let mut h = Harness::start(Screen::Table(Resource::Customers), false);

    h.send(Event::Char('e'));
    h.send(Event::Tab);
    h.type_text(" 2");
    h.send(Event::Enter);

    assert!(!h.state.screen.table().unwrap().modal.is_open());
    assert_eq!(h.visible_codes(), ["CUST-001", "CUST-002", "CUST-003", "CUST-004"]);

    let records = h.state.screen.table().unwrap().records();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].id, "CUST-001");
    assert_eq!(records[0].text("name"), "PT Maju Jaya Logistik 2");
    assert_eq!(records[0].text("contact"), "Budi Santoso");
    assert_eq!(h.state.status.as_ref().map(|s| s.message.as_str()), Some("Saved CUST-001"));
}

#[test]
fn offline_dashboard_is_built_from_demo_snapshot() {
    let h = Harness::start(Screen::Dashboard, false);

    match &h.state.screen {
        ScreenState::Dashboard(dashboard) => {
            assert!(dashboard.metrics.is_some());
            assert_eq!(dashboard.origin, Origin::Demo);
        }
        other => panic!("dashboard not mounted: {other:?}"),
    }
    assert!(matches!(h.viewmodel().body, Body::Tiles(_)));
}

#[test]
fn reports_export_opens_the_pdf_url() {
    let mut h = Harness::start(Screen::Reports, false);

    let actions = h.send(Event::Char('p'));

    let [Action::OpenUrl(url)] = actions.as_slice() else {
        panic!("expected a single OpenUrl, got {actions:?}");
    };
    assert!(url.contains("/reports/analytics/pdf?start_date="));
    assert!(url.contains("&end_date="));
}
