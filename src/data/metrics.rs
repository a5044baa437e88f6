//! Dashboard and report metrics.
//!
//! Each metric set can be decoded from its endpoint's `data` object or derived
//! from demo records when the endpoint is unreachable. Decoding is lenient:
//! missing numbers default to zero.

use super::endpoints::ReportRange;
use super::envelope::decode_data;
use crate::domain::{FieldValue, HaulboardError, Record, Resource, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a metric value is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Count,
    Currency,
    Percent,
    Weight,
}

/// One labelled number on the dashboard or report screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub label: &'static str,
    pub value: f64,
    pub unit: Unit,
}

impl Tile {
    const fn new(label: &'static str, value: f64, unit: Unit) -> Self {
        Self { label, value, unit }
    }

    /// Formatted value ("1,250", "Rp 18,500,000", "87.5%").
    #[must_use]
    pub fn display_value(&self) -> String {
        match self.unit {
            Unit::Count => group_thousands(self.value),
            Unit::Currency => format!("Rp {}", group_thousands(self.value)),
            Unit::Percent => format!("{:.1}%", self.value),
            Unit::Weight => format!("{} kg", group_thousands(self.value)),
        }
    }
}

/// Formats a number rounded to an integer with `,` thousands separators.
#[must_use]
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if rounded < 0.0 {
        out.insert(0, '-');
    }
    out
}

/// Home screen summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardMetrics {
    pub total_job_orders: f64,
    pub open_job_orders: f64,
    pub shipments_in_transit: f64,
    pub pending_deliveries: f64,
    pub outstanding_amount: f64,
    pub available_vehicles: f64,
    pub active_drivers: f64,
    pub active_customers: f64,
}

impl DashboardMetrics {
    /// Decodes a `/dashboard` response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope fails or `data` is not an object.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        decode_object(body)
    }

    /// Derives the summary from record collections.
    #[must_use]
    pub fn from_records(records: &BTreeMap<Resource, Vec<Record>>) -> Self {
        let of = |r: Resource| records.get(&r).map_or(&[][..], Vec::as_slice);

        Self {
            total_job_orders: of(Resource::JobOrders).len() as f64,
            open_job_orders: count_status(of(Resource::JobOrders), &["pending", "in_progress"]),
            shipments_in_transit: count_status(of(Resource::Manifests), &["dispatched", "in_transit"]),
            pending_deliveries: count_status(of(Resource::DeliveryOrders), &["pending", "out_for_delivery"]),
            outstanding_amount: sum_where(of(Resource::Invoices), "amount", |r| {
                matches!(r.text("status").as_str(), "unpaid" | "overdue")
            }),
            available_vehicles: count_status(of(Resource::Vehicles), &["available"]),
            active_drivers: count_status(of(Resource::Drivers), &["active"]),
            active_customers: count_status(of(Resource::Customers), &["active"]),
        }
    }

    #[must_use]
    pub fn tiles(&self) -> Vec<Tile> {
        vec![
            Tile::new("Job orders", self.total_job_orders, Unit::Count),
            Tile::new("Open job orders", self.open_job_orders, Unit::Count),
            Tile::new("Shipments in transit", self.shipments_in_transit, Unit::Count),
            Tile::new("Pending deliveries", self.pending_deliveries, Unit::Count),
            Tile::new("Outstanding invoices", self.outstanding_amount, Unit::Currency),
            Tile::new("Available vehicles", self.available_vehicles, Unit::Count),
            Tile::new("Active drivers", self.active_drivers, Unit::Count),
            Tile::new("Active customers", self.active_customers, Unit::Count),
        ]
    }
}

/// Sales figures for a date range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesReport {
    pub total_revenue: f64,
    pub invoice_count: f64,
    pub paid_amount: f64,
    pub outstanding_amount: f64,
    pub average_invoice: f64,
}

impl SalesReport {
    /// Decodes a `/reports/sales` response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope fails or `data` is not an object.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        decode_object(body)
    }

    /// Derives the report from invoices issued inside `range`.
    #[must_use]
    pub fn from_invoices(invoices: &[Record], range: &ReportRange) -> Self {
        let in_range: Vec<&Record> = invoices.iter().filter(|r| dated_within(r, "issue_date", range)).collect();

        let amount = |r: &&Record| number(r, "amount");
        let total_revenue: f64 = in_range.iter().map(amount).sum();
        let paid_amount: f64 = in_range
            .iter()
            .filter(|r| r.text("status") == "paid")
            .map(amount)
            .sum();
        let invoice_count = in_range.len() as f64;

        Self {
            total_revenue,
            invoice_count,
            paid_amount,
            outstanding_amount: total_revenue - paid_amount,
            average_invoice: if in_range.is_empty() { 0.0 } else { total_revenue / invoice_count },
        }
    }

    #[must_use]
    pub fn tiles(&self) -> Vec<Tile> {
        vec![
            Tile::new("Revenue", self.total_revenue, Unit::Currency),
            Tile::new("Invoices", self.invoice_count, Unit::Count),
            Tile::new("Paid", self.paid_amount, Unit::Currency),
            Tile::new("Outstanding", self.outstanding_amount, Unit::Currency),
            Tile::new("Average invoice", self.average_invoice, Unit::Currency),
        ]
    }
}

/// Operational figures for a date range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationalReport {
    pub job_orders: f64,
    pub completed_job_orders: f64,
    pub cancelled_job_orders: f64,
    pub total_weight_kg: f64,
    pub deliveries: f64,
    pub delivered: f64,
    pub failed_deliveries: f64,
    pub delivery_success_rate: f64,
}

impl OperationalReport {
    /// Decodes a `/reports/operational` response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope fails or `data` is not an object.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        decode_object(body)
    }

    /// Derives the report from job orders and delivery orders dated inside `range`.
    #[must_use]
    pub fn from_records(job_orders: &[Record], deliveries: &[Record], range: &ReportRange) -> Self {
        let jobs: Vec<&Record> = job_orders.iter().filter(|r| dated_within(r, "order_date", range)).collect();
        let drops: Vec<&Record> = deliveries.iter().filter(|r| dated_within(r, "delivery_date", range)).collect();

        let with_status = |set: &[&Record], status: &str| set.iter().filter(|r| r.text("status") == status).count() as f64;
        let delivered = with_status(&drops, "delivered");
        let failed = with_status(&drops, "failed");
        let settled = delivered + failed;

        Self {
            job_orders: jobs.len() as f64,
            completed_job_orders: with_status(&jobs, "completed"),
            cancelled_job_orders: with_status(&jobs, "cancelled"),
            total_weight_kg: jobs.iter().map(|r| number(r, "weight_kg")).sum(),
            deliveries: drops.len() as f64,
            delivered,
            failed_deliveries: failed,
            delivery_success_rate: if settled > 0.0 { delivered / settled * 100.0 } else { 0.0 },
        }
    }

    #[must_use]
    pub fn tiles(&self) -> Vec<Tile> {
        vec![
            Tile::new("Job orders", self.job_orders, Unit::Count),
            Tile::new("Completed", self.completed_job_orders, Unit::Count),
            Tile::new("Cancelled", self.cancelled_job_orders, Unit::Count),
            Tile::new("Weight moved", self.total_weight_kg, Unit::Weight),
            Tile::new("Deliveries", self.deliveries, Unit::Count),
            Tile::new("Delivered", self.delivered, Unit::Count),
            Tile::new("Failed", self.failed_deliveries, Unit::Count),
            Tile::new("Success rate", self.delivery_success_rate, Unit::Percent),
        ]
    }
}

fn decode_object<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T> {
    let data = decode_data(body)?;
    if !data.is_object() {
        return Err(HaulboardError::Decode("metrics data is not an object".to_string()));
    }
    serde_json::from_value(data).map_err(|e| HaulboardError::Decode(e.to_string()))
}

fn count_status(records: &[Record], statuses: &[&str]) -> f64 {
    records
        .iter()
        .filter(|r| statuses.contains(&r.text("status").as_str()))
        .count() as f64
}

fn sum_where(records: &[Record], field: &str, keep: impl Fn(&Record) -> bool) -> f64 {
    records.iter().filter(|r| keep(r)).map(|r| number(r, field)).sum()
}

fn number(record: &Record, field: &str) -> f64 {
    match record.get(field) {
        Some(FieldValue::Number(n)) => *n,
        Some(FieldValue::Text(s)) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn dated_within(record: &Record, field: &str, range: &ReportRange) -> bool {
    match record.get(field) {
        Some(FieldValue::Date(d)) => range.contains(*d),
        Some(FieldValue::Text(s)) => {
            NaiveDate::parse_from_str(s, crate::domain::DATE_FORMAT).is_ok_and(|d| range.contains(d))
        }
        _ => false,
    }
}
