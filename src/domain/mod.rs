//! Domain layer for the Haulboard plugin.
//!
//! Core types independent of Zellij APIs: the record model, the closed status
//! vocabulary, the resource catalog keys, and the crate error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`record`]: Record and field value model
//! - [`resource`]: Record collection kinds
//! - [`status`]: Status enum with labels and tones

pub mod error;
pub mod record;
pub mod resource;
pub mod status;

pub use error::{HaulboardError, Result};
pub use record::{FieldValue, Record, DATE_FORMAT};
pub use resource::Resource;
pub use status::{humanize, Status, Tone};
