//! Record model shared by every list screen.
//!
//! A [`Record`] is one business entity (a customer, a driver, a job order...) held
//! as a mapping of named fields. The dashboard never interprets records beyond
//! their fields: identity comes from the resource's code field, and edits replace
//! the whole record.

use crate::domain::error::{HaulboardError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Date format used by record date fields and report query parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Free text or enum-like text (statuses, types).
    Text(String),
    /// Numeric value (amounts, capacities, counts).
    Number(f64),
    /// Calendar date.
    Date(NaiveDate),
}

impl FieldValue {
    /// Converts a JSON scalar into a field value.
    ///
    /// Strings shaped like `YYYY-MM-DD` become dates. Nulls, arrays and objects
    /// have no field representation and yield `None`.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match value {
            Value::String(s) => Some(
                NaiveDate::parse_from_str(s, DATE_FORMAT)
                    .map_or_else(|_| Self::Text(s.clone()), Self::Date),
            ),
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::Bool(b) => Some(Self::Text(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{n:.0}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

/// One business entity as a field mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identity within its resource (the `code` / `id` field).
    pub id: String,
    /// Named field values, including the identity field itself.
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Creates a record from an identity and field map.
    ///
    /// The identity is also stored under `id_field` so it can be searched and
    /// displayed like any other column.
    #[must_use]
    pub fn new(id: impl Into<String>, id_field: &str, mut fields: BTreeMap<String, FieldValue>) -> Self {
        let id = id.into();
        fields.insert(id_field.to_string(), FieldValue::Text(id.clone()));
        Self { id, fields }
    }

    /// Builds a record from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`HaulboardError::Decode`] if the value is not an object or lacks a
    /// usable identity under `id_field`.
    pub fn from_json(value: &serde_json::Value, id_field: &str) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| HaulboardError::Decode("record is not a JSON object".to_string()))?;

        let id = match object.get(id_field) {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => {
                return Err(HaulboardError::Decode(format!(
                    "record is missing identity field {id_field:?}"
                )))
            }
        };

        let fields = object
            .iter()
            .filter_map(|(name, raw)| FieldValue::from_json(raw).map(|v| (name.clone(), v)))
            .collect();

        Ok(Self::new(id, id_field, fields))
    }

    /// Returns a field value by name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Returns a field rendered as text, or an empty string when absent.
    #[must_use]
    pub fn text(&self, field: &str) -> String {
        self.fields.get(field).map(ToString::to_string).unwrap_or_default()
    }

    /// Renders every field as text, keyed by field name.
    ///
    /// Used to seed an edit form.
    #[must_use]
    pub fn to_text_map(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_reads_identity_and_typed_fields() {
        let value = json!({
            "code": "CUST-001",
            "name": "PT Maju Jaya",
            "credit_limit": 50000000,
            "joined": "2023-04-12",
            "tags": ["a", "b"],
            "notes": null
        });

        let record = Record::from_json(&value, "code").unwrap();

        assert_eq!(record.id, "CUST-001");
        assert_eq!(record.text("name"), "PT Maju Jaya");
        assert_eq!(record.get("credit_limit"), Some(&FieldValue::Number(50_000_000.0)));
        assert_eq!(
            record.get("joined"),
            Some(&FieldValue::Date(NaiveDate::from_ymd_opt(2023, 4, 12).unwrap()))
        );
        assert!(record.get("tags").is_none());
        assert!(record.get("notes").is_none());
    }

    #[test]
    fn from_json_accepts_numeric_identity() {
        let record = Record::from_json(&json!({ "id": 42, "name": "x" }), "id").unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.text("id"), "42");
    }

    #[test]
    fn from_json_rejects_missing_identity() {
        let err = Record::from_json(&json!({ "name": "x" }), "code").unwrap_err();
        assert!(matches!(err, HaulboardError::Decode(_)));

        let err = Record::from_json(&json!({ "code": "  " }), "code").unwrap_err();
        assert!(matches!(err, HaulboardError::Decode(_)));
    }

    #[test]
    fn numbers_display_without_trailing_fraction() {
        assert_eq!(FieldValue::Number(12.0).to_string(), "12");
        assert_eq!(FieldValue::Number(12.5).to_string(), "12.5");
    }
}
