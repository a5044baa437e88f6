//! Background worker thread owning the record store.
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::HaulboardWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
