//! Record sources: bundled fixtures, HTTP endpoints and the worker's store.
//!
//! - [`catalog`]: Per-resource table declarations (columns, search, filters, form)
//! - [`fixtures`]: Bundled demo records
//! - [`envelope`]: Defensive decoding of `{ success, data, message? }` bodies
//! - [`endpoints`]: Endpoint URLs and report date ranges
//! - [`store`]: Record store trait and its in-memory implementation
//! - [`metrics`]: Dashboard and report figures, live or derived from demo data

pub mod catalog;
pub mod endpoints;
pub mod envelope;
pub mod fixtures;
pub mod metrics;
pub mod store;

pub use catalog::{table_spec, Column, ColumnStyle, TableSpec};
pub use endpoints::{pdf_url, Endpoint, ReportRange, DEFAULT_BASE_URL, DEFAULT_REPORT_DAYS};
pub use envelope::{decode_data, decode_records};
pub use fixtures::{demo_records, demo_records_or_empty};
pub use metrics::{DashboardMetrics, OperationalReport, SalesReport, Tile, Unit};
pub use store::{next_code, MemoryStore, Store};

use serde::{Deserialize, Serialize};

/// Where the data on screen came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Origin {
    /// Bundled fixtures or the worker store.
    #[default]
    Demo,
    /// A successful live fetch.
    Live,
}
