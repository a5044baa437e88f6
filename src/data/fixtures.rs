//! Bundled demo records.
//!
//! Every resource ships a JSON fixture compiled into the binary. Fixtures seed the
//! worker's record store and stand in for live endpoints whenever a fetch fails.

use crate::domain::{HaulboardError, Record, Resource, Result};

const fn raw(resource: Resource) -> &'static str {
    match resource {
        Resource::JobOrders => include_str!("../../fixtures/job_orders.json"),
        Resource::Manifests => include_str!("../../fixtures/manifests.json"),
        Resource::DeliveryOrders => include_str!("../../fixtures/delivery_orders.json"),
        Resource::Invoices => include_str!("../../fixtures/invoices.json"),
        Resource::Customers => include_str!("../../fixtures/customers.json"),
        Resource::Drivers => include_str!("../../fixtures/drivers.json"),
        Resource::Vehicles => include_str!("../../fixtures/vehicles.json"),
        Resource::VehicleTypes => include_str!("../../fixtures/vehicle_types.json"),
        Resource::VehicleHistory => include_str!("../../fixtures/vehicle_history.json"),
        Resource::Users => include_str!("../../fixtures/users.json"),
    }
}

/// Parses the demo records of a resource.
///
/// # Errors
///
/// Returns [`HaulboardError::Decode`] if the bundled fixture is malformed.
pub fn demo_records(resource: Resource) -> Result<Vec<Record>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw(resource))
        .map_err(|e| HaulboardError::Decode(format!("{resource} fixture: {e}")))?;

    values
        .iter()
        .map(|v| Record::from_json(v, resource.id_field()))
        .collect()
}

/// Like [`demo_records`], but logs and yields an empty set on a malformed fixture.
#[must_use]
pub fn demo_records_or_empty(resource: Resource) -> Vec<Record> {
    demo_records(resource).unwrap_or_else(|e| {
        tracing::debug!(resource = %resource, error = %e, "failed to parse demo fixture");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_fixture_parses_with_unique_codes() {
        for resource in Resource::ALL {
            let records = demo_records(resource).unwrap();
            assert!(!records.is_empty(), "{resource} has no demo records");

            let ids: HashSet<_> = records.iter().map(|r| r.id.as_str()).collect();
            assert_eq!(ids.len(), records.len(), "{resource} has duplicate codes");

            let prefix = format!("{}-", resource.code_prefix());
            assert!(records.iter().all(|r| r.id.starts_with(&prefix)), "{resource}");
        }
    }

    #[test]
    fn demo_customers_are_the_four_sample_records() {
        let customers = demo_records(Resource::Customers).unwrap();
        assert_eq!(customers.len(), 4);
        assert_eq!(customers[0].text("contact"), "Budi Santoso");
    }
}
