//! Client-side list querying: filtering and pagination.
//!
//! Data flows `records → filter → paginate → table`. Both stages are pure; the
//! table state in [`crate::app::table`] owns the mutable [`FilterState`] and
//! [`PageState`] and decides when to re-run them.

pub mod filter;
pub mod paginate;

pub use filter::{filter, CategoricalFilter, FilterState, Selection, ALL};
pub use paginate::{paginate, total_pages, Page, PageState};
