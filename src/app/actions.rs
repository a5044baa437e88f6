//! Side effects requested by the event handler.
//!
//! [`crate::app::handle_event`] never talks to the host directly. It returns a
//! list of actions that the plugin shim in `main.rs` executes in order.

use crate::data::Endpoint;
use crate::worker::WorkerMessage;

/// A side effect for the plugin runtime to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Posts a message to the record store worker.
    PostToWorker(WorkerMessage),

    /// Issues an HTTP GET. The result must come back as
    /// [`crate::app::Event::FetchCompleted`] carrying the same endpoint and
    /// generation.
    Fetch {
        endpoint: Endpoint,
        url: String,
        generation: u64,
    },

    /// Opens a URL with the host's opener (`xdg-open`).
    OpenUrl(String),

    /// Arms a one-shot timer; it fires [`crate::app::Event::Tick`].
    ArmTimer(f64),
}
