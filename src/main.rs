//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Haulboard library and the Zellij plugin
//! system: it translates host events into [`Event`]s and carries out the
//! [`Action`]s the library returns.
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │      web_request ──► backend API
//! │  │  State (plugin)  │───┼────► run_command ──► xdg-open
//! │  └──────────────────┘   │      set_timeout ──► Timer
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │ HaulboardWorker  │   │  ← demo record store
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Event Mapping
//!
//! - `Key` → navigation, text and command keys
//! - `WebRequestResult` → `Event::FetchCompleted` (endpoint and generation
//!   travel in the request context)
//! - `Timer` → `Event::Tick`
//! - `RunCommandResult` → `Event::OpenerFinished`
//! - `CustomMessage` from the worker → `Event::WorkerResponse`
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//!
//! # Keybindings
//!
//! Global: `Ctrl+n` / `Ctrl+p` move down / up, `Tab` / `Shift+Tab` switch
//! screens. Everything else is interpreted by the library per input mode.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use haulboard::data::Endpoint;
use haulboard::worker::{HaulboardWorker, WorkerMessage, WorkerResponse};
use haulboard::{handle_event, Action, Config, Event};

register_plugin!(State);
register_worker!(HaulboardWorker, haulboard_worker, HAULBOARD_WORKER);

const WORKER_NAME: &str = "haulboard";
const CONTEXT_ENDPOINT: &str = "endpoint";
const CONTEXT_GENERATION: &str = "generation";
const CONTEXT_COMMAND: &str = "command";
const OPENER: &str = "xdg-open";

struct State {
    app: haulboard::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: haulboard::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        haulboard::observability::init_tracing(&config);
        install_panic_hook();

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            api_base_url = %config.api_base_url,
            page_size = config.page_size.get(),
            start_screen = %config.start_screen,
            "parsed configuration"
        );
        self.app = haulboard::initialize(&config);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);
        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match Self::map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result_event(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_) => Event::Tick,
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, context) => {
                if context.get(CONTEXT_COMMAND).map(String::as_str) != Some(OPENER) {
                    return false;
                }
                Event::OpenerFinished {
                    exit_code,
                    stderr: String::from_utf8_lossy(&stderr).into_owned(),
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                let granted = matches!(status, PermissionStatus::Granted);
                if !granted {
                    tracing::warn!("permissions denied - running on demo data");
                }
                Event::PermissionsResult { granted }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        haulboard::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::Down),
                BareKey::Char('p') => Some(Event::Up),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::BackTab,
            BareKey::Tab => Event::Tab,
            BareKey::Up => Event::Up,
            BareKey::Down => Event::Down,
            BareKey::Left => Event::Left,
            BareKey::Right => Event::Right,
            BareKey::Enter => Event::Enter,
            BareKey::Esc => Event::Escape,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }
        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Recovers endpoint and generation from the request context.
    fn map_web_result_event(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let endpoint = context
            .get(CONTEXT_ENDPOINT)
            .and_then(|raw| serde_json::from_str::<Endpoint>(raw).ok());
        let generation = context.get(CONTEXT_GENERATION).and_then(|raw| raw.parse::<u64>().ok());

        match (endpoint, generation) {
            (Some(endpoint), Some(generation)) => Some(Event::FetchCompleted {
                endpoint,
                generation,
                status,
                body,
            }),
            _ => {
                tracing::debug!(context = ?context, "web result without request context");
                None
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => post_message_to(PluginMessage {
                worker_name: Some(WORKER_NAME.to_string()),
                name: WORKER_NAME.to_string(),
                payload,
            }),
            Err(e) => tracing::debug!(error = %e, "failed to serialize worker message"),
        }
    }

    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::PostToWorker(message) => Self::post_worker_message(message),
            Action::Fetch {
                endpoint,
                url,
                generation,
            } => {
                let endpoint_json = match serde_json::to_string(endpoint) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::debug!(error = %e, "failed to serialize endpoint");
                        return;
                    }
                };
                let context = BTreeMap::from([
                    (CONTEXT_ENDPOINT.to_string(), endpoint_json),
                    (CONTEXT_GENERATION.to_string(), generation.to_string()),
                ]);
                let headers = BTreeMap::from([("Accept".to_string(), "application/json".to_string())]);
                web_request(url, HttpVerb::Get, headers, vec![], context);
            }
            Action::OpenUrl(url) => {
                let context = BTreeMap::from([(CONTEXT_COMMAND.to_string(), OPENER.to_string())]);
                run_command(&[OPENER, url.as_str()], context);
            }
            Action::ArmTimer(seconds) => set_timeout(*seconds),
        }
    }
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "plugin panicked");
        default_hook(info);
    }));
}
