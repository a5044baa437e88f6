//! Haulboard: a logistics back-office dashboard as a Zellij plugin.
//!
//! Haulboard puts the list screens of a freight operation (job orders,
//! manifests, delivery orders, invoices, customers, fleet and users) into a
//! terminal pane:
//! - Search plus categorical filters over every list, with pagination
//! - Create, edit and delete through form and confirmation dialogs
//! - A polled dashboard and a reports screen with PDF export
//! - Live data from the backend API, falling back to bundled demo records
//!   whenever a request fails or web access is not granted

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Router, screens, input modes                     │
//! │  - Request generations and deadlines                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI (ui/)      │   │ Query, Forms  │   │ Worker        │
//! │ - Components  │   │ - filter      │   │ - Demo store  │
//! │ - Theming     │   │ - paginate    │   │ - Snapshots   │
//! │               │   │ - modals      │   │ - Mutations   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Data & Domain                                      │
//! │  - Endpoints, envelope decoding, fixtures, metrics  │
//! │  - Records, resources, statuses, errors             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/haulboard.wasm" {
//!         api_base_url "http://localhost:8080"
//!         page_size "10"
//!         refresh_interval "30"
//!         request_timeout "10"
//!         start_screen "dashboard"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Library usage
//!
//! ```rust
//! use haulboard::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_render, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: false })?;
//! assert!(!actions.is_empty());
//! # Ok::<(), haulboard::HaulboardError>(())
//! ```
//!
//! # Platform
//!
//! Built for `wasm32-wasip1` and loaded by Zellij; the library half is
//! plain Rust and runs its tests on the host.

pub mod app;
pub mod data;
pub mod domain;
pub mod forms;
pub mod infrastructure;
pub mod observability;
pub mod query;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode, Screen, Settings};
pub use domain::{HaulboardError, Record, Resource, Result};
pub use ui::Theme;

use data::DEFAULT_BASE_URL;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::time::Duration;

const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_REFRESH_SECS: u64 = 30;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend root, without a trailing slash.
    pub api_base_url: String,
    /// Rows per table page.
    pub page_size: NonZeroUsize,
    /// Dashboard polling period.
    pub refresh_interval: Duration,
    /// Deadline for each HTTP GET.
    pub request_timeout: Duration,
    /// Built-in theme name; ignored when `theme_file` is set.
    pub theme_name: Option<String>,
    /// Path to a custom TOML theme. `~` maps to the sandbox `/host` mount.
    pub theme_file: Option<String>,
    /// `EnvFilter` directive for spans. Default: `"info"`
    pub trace_level: Option<String>,
    pub start_screen: Screen,
    /// Values that were present but unusable; logged once tracing is up.
    pub rejected: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            start_screen: Screen::Dashboard,
            rejected: Vec::new(),
        }
    }
}

impl Config {
    /// Parses configuration, keeping defaults for absent or invalid keys.
    ///
    /// Durations are whole seconds and must be positive.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use haulboard::{Config, Screen};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "25".to_string());
    /// map.insert("start_screen".to_string(), "customers".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.page_size.get(), 25);
    /// assert_eq!(config.start_screen, Screen::Table(haulboard::Resource::Customers));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let mut parsed = Self::default();
        let value = |key: &str| config.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        if let Some(url) = value("api_base_url") {
            if url.starts_with("http://") || url.starts_with("https://") {
                parsed.api_base_url = url.trim_end_matches('/').to_string();
            } else {
                parsed.reject("api_base_url", url);
            }
        }

        if let Some(raw) = value("page_size") {
            match raw.parse::<usize>().ok().and_then(NonZeroUsize::new) {
                Some(size) => parsed.page_size = size,
                None => parsed.reject("page_size", raw),
            }
        }

        for (key, slot) in [
            ("refresh_interval", &mut parsed.refresh_interval),
            ("request_timeout", &mut parsed.request_timeout),
        ] {
            if let Some(raw) = value(key) {
                match raw.parse::<u64>() {
                    Ok(secs) if secs > 0 => *slot = Duration::from_secs(secs),
                    _ => parsed.rejected.push(rejection(key, raw)),
                }
            }
        }

        if let Some(raw) = value("start_screen") {
            match Screen::from_slug(raw) {
                Some(screen) => parsed.start_screen = screen,
                None => parsed.reject("start_screen", raw),
            }
        }

        parsed.theme_name = value("theme").map(String::from);
        parsed.theme_file = value("theme_file").map(String::from);
        parsed.trace_level = value("trace_level").map(String::from);
        parsed
    }

    fn reject(&mut self, key: &str, raw: &str) {
        self.rejected.push(rejection(key, raw));
    }

    /// Runtime settings for [`AppState`].
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            api_base_url: self.api_base_url.clone(),
            page_size: self.page_size,
            refresh_interval: self.refresh_interval,
            request_timeout: self.request_timeout,
            start_screen: self.start_screen,
        }
    }

    /// Resolves the theme: file first, then name, then the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(file) = &self.theme_file {
            let path = infrastructure::expand_tilde(file);
            match Theme::from_file(&path) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(theme_file = %path, error = %e, "failed to load theme file, using default"),
            }
        } else if let Some(name) = &self.theme_name {
            match Theme::from_name(name) {
                Some(theme) => return theme,
                None => tracing::warn!(theme_name = %name, "unknown theme, using default"),
            }
        }
        Theme::default()
    }
}

fn rejection(key: &str, raw: &str) -> String {
    HaulboardError::Config(format!("ignoring {key} = {raw:?}")).to_string()
}

/// Builds the initial state for today's local date.
///
/// Nothing is fetched yet; the first load starts with
/// [`Event::PermissionsResult`].
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(start_screen = %config.start_screen, "initializing haulboard plugin");

    for problem in &config.rejected {
        tracing::warn!(error = %problem, "configuration value rejected");
    }

    let today = chrono::Local::now().date_naive();
    let mut state = AppState::new(config.settings(), config.theme(), today);
    if let Some(first) = config.rejected.first() {
        state.set_status(first.clone(), domain::Tone::Warning);
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_yields_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());
        assert_eq!(config.page_size.get(), 10);
        assert_eq!(config.refresh_interval, Duration::from_secs(30));
    }

    #[test]
    fn typed_values_are_parsed() {
        let config = Config::from_zellij(&map(&[
            ("api_base_url", "https://ops.example.com/"),
            ("page_size", "5"),
            ("refresh_interval", "60"),
            ("request_timeout", "3"),
            ("start_screen", "reports"),
            ("theme", "catppuccin-latte"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.api_base_url, "https://ops.example.com");
        assert_eq!(config.page_size.get(), 5);
        assert_eq!(config.refresh_interval, Duration::from_secs(60));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.start_screen, Screen::Reports);
        assert_eq!(config.theme().name, "catppuccin-latte");
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert!(config.rejected.is_empty());
    }

    #[test]
    fn invalid_values_keep_defaults_and_are_reported() {
        let config = Config::from_zellij(&map(&[
            ("api_base_url", "localhost:8080"),
            ("page_size", "0"),
            ("refresh_interval", "soon"),
            ("start_screen", "nowhere"),
        ]));

        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.page_size.get(), 10);
        assert_eq!(config.refresh_interval, Duration::from_secs(30));
        assert_eq!(config.start_screen, Screen::Dashboard);
        assert_eq!(config.rejected.len(), 4);
        assert!(config.rejected[0].starts_with("Configuration error: ignoring api_base_url"));
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config::from_zellij(&map(&[("theme", "solarized")]));
        assert_eq!(config.theme(), Theme::default());
    }

    #[test]
    fn initialize_surfaces_the_first_rejection() {
        let config = Config::from_zellij(&map(&[("page_size", "-3")]));
        let state = initialize(&config);
        let status = state.status.expect("status line");
        assert!(status.message.contains("page_size"));
        assert_eq!(state.settings.page_size.get(), 10);
    }
}
