//! Error types for the Haulboard plugin.
//!
//! This module defines the centralized error type [`HaulboardError`] and a type alias
//! [`Result`] used throughout the plugin. Errors are declared with `thiserror`.

use thiserror::Error;

/// The main error type for Haulboard operations.
///
/// Network and decode failures are normally caught where they happen and turned
/// into a fallback to demo data, so most variants end up in a log line rather than
/// in front of the user. Validation errors are the exception: they are rendered
/// inline inside the form modal.
#[derive(Debug, Error)]
pub enum HaulboardError {
    /// An HTTP request failed or returned a non-success status.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// A response body could not be decoded as the expected JSON envelope.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A form failed validation at submit time.
    #[error("{0}")]
    Validation(#[from] crate::forms::ValidationError),

    /// A categorical filter was given a value outside its declared options.
    #[error("Invalid filter value {value:?} for filter {filter:?}")]
    InvalidFilterValue {
        /// Filter name.
        filter: String,
        /// Rejected value.
        value: String,
    },

    /// The in-memory record store rejected an operation.
    #[error("Store error: {0}")]
    Store(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for Haulboard operations.
pub type Result<T> = std::result::Result<T, HaulboardError>;
