//! FILENAME: core/roster-source/src/payload.rs
//! Shape check for source payloads.
//!
//! The only hard requirement is a top-level JSON array. Elements that are not
//! objects are skipped; fields inside objects are read leniently by
//! `ScheduleRecord`'s deserializer.

use log::{debug, warn};
use roster_engine::ScheduleRecord;
use serde_json::Value;

use crate::error::SourceError;

pub fn parse_payload(bytes: &[u8]) -> Result<Vec<ScheduleRecord>, SourceError> {
    let value: Value = serde_json::from_slice(bytes)?;
    records_from_value(value)
}

pub fn records_from_value(value: Value) -> Result<Vec<ScheduleRecord>, SourceError> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(SourceError::NotAnArray {
                found: json_kind(&other),
            })
        }
    };

    let total = items.len();
    let mut records = Vec::with_capacity(total);
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            warn!("skipping payload element {} ({})", index, json_kind(&item));
            continue;
        }
        match serde_json::from_value::<ScheduleRecord>(item) {
            Ok(record) => records.push(record),
            Err(e) => warn!("skipping payload element {}: {}", index, e),
        }
    }

    debug!("parsed {} of {} payload elements", records.len(), total);
    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
