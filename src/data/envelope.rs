//! Decoding of the `{ success, data, message? }` response envelope.
//!
//! Endpoints are consumed defensively: `data` may be the record array itself or
//! an object wrapping it under `items`, `data` or `records`. Anything else is a
//! decode error and the caller falls back to demo data.

use crate::domain::{HaulboardError, Record, Resource, Result};
use serde::Deserialize;
use serde_json::Value;

const WRAPPER_KEYS: [&str; 3] = ["items", "data", "records"];

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    message: Option<String>,
}

const fn default_success() -> bool {
    true
}

/// Unwraps the envelope and returns its `data` payload.
///
/// # Errors
///
/// Returns [`HaulboardError::Decode`] if the body is not JSON and
/// [`HaulboardError::Fetch`] if the server reported `success: false`.
pub fn decode_data(body: &[u8]) -> Result<Value> {
    let envelope: Envelope = serde_json::from_slice(body).map_err(|e| HaulboardError::Decode(e.to_string()))?;

    if !envelope.success {
        return Err(HaulboardError::Fetch(
            envelope.message.unwrap_or_else(|| "server reported failure".to_string()),
        ));
    }

    Ok(envelope.data)
}

/// Decodes a list endpoint body into records.
///
/// Entries without a usable identity are skipped with a log line.
///
/// # Errors
///
/// Returns an error when the envelope fails (see [`decode_data`]) or when no
/// record array can be found inside `data`.
pub fn decode_records(body: &[u8], resource: Resource) -> Result<Vec<Record>> {
    let data = decode_data(body)?;
    let items = find_array(&data).ok_or_else(|| {
        HaulboardError::Decode(format!("{resource} response carries no record array"))
    })?;

    let records = items
        .iter()
        .filter_map(|item| match Record::from_json(item, resource.id_field()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(resource = %resource, error = %e, "skipping undecodable record");
                None
            }
        })
        .collect();

    Ok(records)
}

fn find_array(data: &Value) -> Option<&Vec<Value>> {
    match data {
        Value::Array(items) => Some(items),
        Value::Object(map) => WRAPPER_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array)),
        _ => None,
    }
}
