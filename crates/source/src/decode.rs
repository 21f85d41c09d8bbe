//! Per-element decoding of record arrays.

use rao_core::funding::RecordSet;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Decodes each element on its own, skipping the ones that do not decode.
pub fn decode_records<T: DeserializeOwned>(values: Vec<Value>, origin: &str) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(origin, index, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect()
}

/// A record set from an optional JSON array; anything but an array is missing.
pub fn record_set<T: DeserializeOwned>(value: Option<Value>, origin: &str) -> RecordSet<T> {
    match value {
        Some(Value::Array(values)) => RecordSet::loaded(decode_records(values, origin)),
        Some(Value::Null) | None => RecordSet::missing(),
        Some(_) => {
            warn!(origin, "Expected an array of records; treating as missing");
            RecordSet::missing()
        }
    }
}
