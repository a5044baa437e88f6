//! Record store owned by the worker.
//!
//! The [`Store`] trait is the seam between worker message handling and record
//! keeping. [`MemoryStore`] is the only implementation: records live in memory
//! for the lifetime of the worker, seeded from the demo fixtures.

use super::catalog::table_spec;
use super::fixtures;
use crate::domain::{FieldValue, HaulboardError, Record, Resource, Result, DATE_FORMAT};
use crate::forms::{validate, FieldKind, FormMode};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Record keeping behind the worker.
pub trait Store: Send {
    /// Returns every record of a resource, in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn list(&self, resource: Resource) -> Result<Vec<Record>>;

    /// Replaces the whole collection of a resource (after a live fetch).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn replace(&mut self, resource: Resource, records: Vec<Record>) -> Result<()>;

    /// Creates or replaces one record from form values.
    ///
    /// # Errors
    ///
    /// Returns [`HaulboardError::Validation`] when the values fail the resource's
    /// form schema and [`HaulboardError::Store`] for duplicate or unknown codes.
    fn upsert(&mut self, resource: Resource, mode: &FormMode, values: &BTreeMap<String, String>) -> Result<Record>;

    /// Removes one record.
    ///
    /// # Errors
    ///
    /// Returns [`HaulboardError::Store`] if no record has that id.
    fn delete(&mut self, resource: Resource, id: &str) -> Result<()>;
}

/// In-memory store keyed by resource.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: BTreeMap<Resource, Vec<Record>>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with every resource's demo records.
    #[must_use]
    pub fn seeded() -> Self {
        let records = Resource::ALL
            .into_iter()
            .map(|r| (r, fixtures::demo_records_or_empty(r)))
            .collect();
        Self { records }
    }

    fn collection(&mut self, resource: Resource) -> &mut Vec<Record> {
        self.records.entry(resource).or_default()
    }
}

impl Store for MemoryStore {
    fn list(&self, resource: Resource) -> Result<Vec<Record>> {
        Ok(self.records.get(&resource).cloned().unwrap_or_default())
    }

    fn replace(&mut self, resource: Resource, records: Vec<Record>) -> Result<()> {
        tracing::debug!(resource = %resource, count = records.len(), "replacing collection");
        self.records.insert(resource, records);
        Ok(())
    }

    fn upsert(&mut self, resource: Resource, mode: &FormMode, values: &BTreeMap<String, String>) -> Result<Record> {
        let schema = table_spec(resource).form;
        validate(schema, values)?;

        let id_field = resource.id_field();
        let collection = self.collection(resource);

        let id = match mode {
            FormMode::Edit { id } => id.clone(),
            FormMode::Create => match values.get(id_field).map(|v| v.trim()) {
                Some(code) if !code.is_empty() => {
                    if collection.iter().any(|r| r.id == code) {
                        return Err(HaulboardError::Store(format!("{} {code} already exists", resource.singular())));
                    }
                    code.to_string()
                }
                _ => next_code(resource, collection),
            },
        };

        let fields = schema
            .iter()
            .filter(|f| f.name != id_field)
            .filter_map(|f| {
                let raw = values.get(f.name)?.trim();
                typed_value(f.kind, raw).map(|v| (f.name.to_string(), v))
            })
            .collect();
        let record = Record::new(id, id_field, fields);

        match mode {
            FormMode::Create => collection.push(record.clone()),
            FormMode::Edit { id } => {
                let slot = collection
                    .iter_mut()
                    .find(|r| &r.id == id)
                    .ok_or_else(|| HaulboardError::Store(format!("{} {id} not found", resource.singular())))?;
                *slot = record.clone();
            }
        }

        tracing::debug!(resource = %resource, id = %record.id, "record saved");
        Ok(record)
    }

    fn delete(&mut self, resource: Resource, id: &str) -> Result<()> {
        let collection = self.collection(resource);
        let before = collection.len();
        collection.retain(|r| r.id != id);

        if collection.len() == before {
            return Err(HaulboardError::Store(format!("{} {id} not found", resource.singular())));
        }
        tracing::debug!(resource = %resource, id = %id, "record deleted");
        Ok(())
    }
}

/// Next `PREFIX-NNN` code: one past the highest numeric suffix in use.
#[must_use]
pub fn next_code(resource: Resource, records: &[Record]) -> String {
    let prefix = format!("{}-", resource.code_prefix());
    let highest = records
        .iter()
        .filter_map(|r| r.id.strip_prefix(&prefix)?.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}{:03}", highest + 1)
}

fn typed_value(kind: FieldKind, raw: &str) -> Option<FieldValue> {
    if raw.is_empty() {
        return None;
    }
    let value = match kind {
        FieldKind::Number => raw.parse::<f64>().map_or_else(|_| FieldValue::Text(raw.to_string()), FieldValue::Number),
        FieldKind::Date => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_or_else(|_| FieldValue::Text(raw.to_string()), FieldValue::Date),
        _ => FieldValue::Text(raw.to_string()),
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    fn new_customer() -> BTreeMap<String, String> {
        values(&[
            ("code", ""),
            ("name", "PT Baru"),
            ("contact", "Rina"),
            ("type", "corporate"),
            ("status", "active"),
        ])
    }

    #[test]
    fn create_assigns_next_code() {
        let mut store = MemoryStore::seeded();
        let record = store.upsert(Resource::Customers, &FormMode::Create, &new_customer()).unwrap();

        assert_eq!(record.id, "CUST-005");
        assert_eq!(record.text("code"), "CUST-005");
        let all = store.list(Resource::Customers).unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all.last().unwrap().id, "CUST-005");
    }

    #[test]
    fn create_rejects_duplicate_code() {
        let mut store = MemoryStore::seeded();
        let mut v = new_customer();
        v.insert("code".to_string(), "CUST-001".to_string());
        let err = store.upsert(Resource::Customers, &FormMode::Create, &v).unwrap_err();
        assert!(matches!(err, HaulboardError::Store(_)));
    }

    #[test]
    fn edit_replaces_whole_record() {
        let mut store = MemoryStore::seeded();
        let mode = FormMode::Edit { id: "CUST-002".to_string() };
        store.upsert(Resource::Customers, &mode, &new_customer()).unwrap();

        let all = store.list(Resource::Customers).unwrap();
        let edited = all.iter().find(|r| r.id == "CUST-002").unwrap();
        assert_eq!(edited.text("name"), "PT Baru");
        assert_eq!(edited.text("city"), "");
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn invalid_values_are_rejected_before_writing() {
        let mut store = MemoryStore::seeded();
        let err = store
            .upsert(Resource::Customers, &FormMode::Create, &values(&[("name", "x")]))
            .unwrap_err();
        assert!(matches!(err, HaulboardError::Validation(_)));
        assert_eq!(store.list(Resource::Customers).unwrap().len(), 4);
    }

    #[test]
    fn numbers_and_dates_are_typed() {
        let mut store = MemoryStore::new();
        let v = values(&[
            ("plate", "B 1 XX"),
            ("date", "2024-06-01"),
            ("event", "service"),
            ("cost", "1500000"),
        ]);
        let record = store.upsert(Resource::VehicleHistory, &FormMode::Create, &v).unwrap();
        assert_eq!(record.id, "VHH-001");
        assert_eq!(record.get("cost"), Some(&FieldValue::Number(1_500_000.0)));
        assert!(matches!(record.get("date"), Some(FieldValue::Date(_))));
    }

    #[test]
    fn delete_unknown_id_fails() {
        let mut store = MemoryStore::seeded();
        store.delete(Resource::Drivers, "DRV-001").unwrap();
        assert!(matches!(store.delete(Resource::Drivers, "DRV-001"), Err(HaulboardError::Store(_))));
    }

    #[test]
    fn next_code_ignores_foreign_ids() {
        let records = vec![
            Record::new("JO-009", "code", BTreeMap::new()),
            Record::new("legacy-77", "code", BTreeMap::new()),
        ];
        assert_eq!(next_code(Resource::JobOrders, &records), "JO-010");
    }
}
