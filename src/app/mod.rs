//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the data, query, forms and
//! worker layers:
//!
//! ```text
//! User Input → Events → handle_event → State Mutations → Actions → Side Effects
//!                            ↑                                  ↓
//!                            └──── HTTP results / Worker Responses ┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode state machine
//! - [`palette`]: Fuzzy "go to screen" palette
//! - [`requests`]: Request generations and deadlines
//! - [`router`]: Screen catalog and back navigation
//! - [`screens`]: Per-screen local state
//! - [`state`]: Central state container and view model computation
//! - [`table`]: Mounted list screen state (filter, page, cursor, modal)

pub mod actions;
pub mod handler;
pub mod modes;
pub mod palette;
pub mod requests;
pub mod router;
pub mod screens;
pub mod state;
pub mod table;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use router::{Router, Screen};
pub use state::{AppState, Settings};
