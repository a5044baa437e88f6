//! Per-screen local state.
//!
//! Created when a screen is mounted and dropped when the user navigates away.

use super::router::Screen;
use super::table::TableState;
use crate::data::{DashboardMetrics, OperationalReport, Origin, ReportRange, SalesReport, DEFAULT_REPORT_DAYS};
use crate::domain::{Record, Resource};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;

/// Dashboard summary state.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Last figures received; `None` until the first load settles.
    pub metrics: Option<DashboardMetrics>,
    pub origin: Origin,
    /// Set when the live fetch failed and the demo snapshot was requested.
    pub awaiting_snapshot: bool,
}

impl DashboardState {
    pub fn apply_snapshot(&mut self, snapshot: &BTreeMap<Resource, Vec<Record>>) {
        if self.awaiting_snapshot {
            self.metrics = Some(DashboardMetrics::from_records(snapshot));
            self.origin = Origin::Demo;
            self.awaiting_snapshot = false;
        }
    }
}

/// Reports screen state: one date range, two metric sets.
#[derive(Debug, Clone)]
pub struct ReportsState {
    pub range: ReportRange,
    pub sales: Option<SalesReport>,
    pub sales_origin: Origin,
    pub operational: Option<OperationalReport>,
    pub operational_origin: Origin,
    pub sales_awaiting_snapshot: bool,
    pub operational_awaiting_snapshot: bool,
}

impl ReportsState {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            range: ReportRange::ending(today, DEFAULT_REPORT_DAYS),
            sales: None,
            sales_origin: Origin::Demo,
            operational: None,
            operational_origin: Origin::Demo,
            sales_awaiting_snapshot: false,
            operational_awaiting_snapshot: false,
        }
    }

    /// Clears both metric sets ahead of a reload for a new range.
    pub fn reset(&mut self) {
        self.sales = None;
        self.operational = None;
        self.sales_awaiting_snapshot = false;
        self.operational_awaiting_snapshot = false;
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.sales.is_none() || self.operational.is_none()
    }

    /// Live only when both sets came from the API.
    #[must_use]
    pub fn origin(&self) -> Origin {
        if self.sales_origin == Origin::Live && self.operational_origin == Origin::Live {
            Origin::Live
        } else {
            Origin::Demo
        }
    }

    pub fn apply_snapshot(&mut self, snapshot: &BTreeMap<Resource, Vec<Record>>) {
        let of = |r: Resource| snapshot.get(&r).map_or(&[][..], Vec::as_slice);

        if self.sales_awaiting_snapshot {
            self.sales = Some(SalesReport::from_invoices(of(Resource::Invoices), &self.range));
            self.sales_origin = Origin::Demo;
            self.sales_awaiting_snapshot = false;
        }
        if self.operational_awaiting_snapshot {
            self.operational = Some(OperationalReport::from_records(
                of(Resource::JobOrders),
                of(Resource::DeliveryOrders),
                &self.range,
            ));
            self.operational_origin = Origin::Demo;
            self.operational_awaiting_snapshot = false;
        }
    }
}

/// State of the mounted screen.
#[derive(Debug, Clone)]
pub enum ScreenState {
    Dashboard(DashboardState),
    Table(TableState),
    Reports(ReportsState),
}

impl ScreenState {
    /// Fresh state for mounting `screen`.
    #[must_use]
    pub fn mount(screen: Screen, page_size: NonZeroUsize, today: NaiveDate) -> Self {
        match screen {
            Screen::Dashboard => Self::Dashboard(DashboardState::default()),
            Screen::Table(resource) => Self::Table(TableState::new(resource, page_size)),
            Screen::Reports => Self::Reports(ReportsState::new(today)),
        }
    }

    #[must_use]
    pub const fn table(&self) -> Option<&TableState> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn table_mut(&mut self) -> Option<&mut TableState> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }

    /// The mounted table, if it lists `resource`.
    pub fn table_for(&mut self, resource: Resource) -> Option<&mut TableState> {
        self.table_mut().filter(|t| t.resource == resource)
    }
}
