//! HTTP endpoints and report date ranges.

use crate::domain::{Resource, DATE_FORMAT};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default base URL when `api_base_url` is not configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default report window length in days.
pub const DEFAULT_REPORT_DAYS: i64 = 30;

/// Something the plugin can GET.
///
/// Also the key for request generations: a newer request to the same endpoint
/// supersedes the older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Endpoint {
    Records(Resource),
    Dashboard,
    SalesReport,
    OperationalReport,
}

impl Endpoint {
    /// The list endpoint of a resource, if it has a live one.
    #[must_use]
    pub fn for_resource(resource: Resource) -> Option<Self> {
        resource.endpoint().map(|_| Self::Records(resource))
    }

    /// Path relative to the base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Records(resource) => match resource.endpoint() {
                Some(path) => path,
                None => "",
            },
            Self::Dashboard => "/dashboard",
            Self::SalesReport => "/reports/sales",
            Self::OperationalReport => "/reports/operational",
        }
    }

    /// Full URL of the endpoint. Report endpoints carry the range as query parameters.
    #[must_use]
    pub fn url(self, base: &str, range: &ReportRange) -> String {
        let url = join(base, self.path());
        match self {
            Self::SalesReport | Self::OperationalReport => format!("{url}?{}", range.query()),
            Self::Records(_) | Self::Dashboard => url,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Records(resource) => write!(f, "{resource}"),
            Self::Dashboard => f.write_str("dashboard"),
            Self::SalesReport => f.write_str("sales report"),
            Self::OperationalReport => f.write_str("operational report"),
        }
    }
}

/// URL of the analytics PDF for a range.
#[must_use]
pub fn pdf_url(base: &str, range: &ReportRange) -> String {
    format!("{}?{}", join(base, "/reports/analytics/pdf"), range.query())
}

fn join(base: &str, path: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

/// Inclusive report date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportRange {
    /// The `days`-long window ending on `today`.
    #[must_use]
    pub fn ending(today: NaiveDate, days: i64) -> Self {
        let days = days.max(1);
        Self {
            start: today - Duration::days(days - 1),
            end: today,
        }
    }

    /// Number of days covered, both ends included.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether a date falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Shifts the range by one whole period.
    ///
    /// Shifting forward is refused when the new range would end after `today`.
    /// Returns whether the range moved.
    pub fn shift(&mut self, forward: bool, today: NaiveDate) -> bool {
        let step = Duration::days(self.days());
        if forward {
            let end = self.end + step;
            if end > today {
                return false;
            }
            self.start += step;
            self.end = end;
        } else {
            self.start -= step;
            self.end -= step;
        }
        true
    }

    /// `start_date=…&end_date=…` query string.
    #[must_use]
    pub fn query(&self) -> String {
        format!(
            "start_date={}&end_date={}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

impl fmt::Display for ReportRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.start.format(DATE_FORMAT), self.end.format(DATE_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn urls_join_without_double_slashes() {
        let range = ReportRange::ending(day(2024, 5, 31), 31);
        assert_eq!(
            Endpoint::Records(Resource::Customers).url("http://api.local/", &range),
            "http://api.local/api/v1/customers"
        );
        assert_eq!(Endpoint::Dashboard.url("http://api.local", &range), "http://api.local/dashboard");
        assert_eq!(
            Endpoint::SalesReport.url("http://api.local", &range),
            "http://api.local/reports/sales?start_date=2024-05-01&end_date=2024-05-31"
        );
        assert_eq!(
            pdf_url("http://api.local/", &range),
            "http://api.local/reports/analytics/pdf?start_date=2024-05-01&end_date=2024-05-31"
        );
    }

    #[test]
    fn only_live_resources_have_endpoints() {
        assert_eq!(Endpoint::for_resource(Resource::JobOrders), Some(Endpoint::Records(Resource::JobOrders)));
        assert_eq!(Endpoint::for_resource(Resource::Drivers), None);
    }

    #[test]
    fn default_window_covers_thirty_days() {
        let range = ReportRange::ending(day(2024, 6, 30), DEFAULT_REPORT_DAYS);
        assert_eq!(range.start, day(2024, 6, 1));
        assert_eq!(range.days(), 30);
        assert!(range.contains(day(2024, 6, 1)));
        assert!(!range.contains(day(2024, 5, 31)));
    }

    #[test]
    fn shifting_moves_whole_periods_and_stops_at_today() {
        let today = day(2024, 6, 30);
        let mut range = ReportRange::ending(today, 10);

        assert!(!range.shift(true, today));
        assert!(range.shift(false, today));
        assert_eq!(range, ReportRange::ending(day(2024, 6, 20), 10));
        assert!(range.shift(true, today));
        assert_eq!(range.end, today);
    }
}
