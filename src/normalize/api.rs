//! API payload front end — feeds exported ad-platform JSON through the same
//! raw-row interface as CSV and UTM input.
//!
//! Deliberately file-fed: no network client lives in this crate. A payload
//! is either a bare JSON array of row objects or a Graph-API-style envelope
//! with a `data` array. Scalar values become strings; nested structures are
//! ignored, mirroring the unrecognized-column rule of the CSV path.

use serde_json::Value;

use crate::advisor::Benchmarks;
use crate::error::ParseError;
use crate::model::Source;
use crate::normalize::{Batch, RawRow, normalize_rows};

/// Parse a JSON payload into raw rows.
pub fn rows_from_json(payload: &str) -> Result<Vec<RawRow>, ParseError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|err| ParseError::InvalidPayload(err.to_string()))?;

    let items = match &value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => {
                return Err(ParseError::InvalidPayload(
                    "expected an array of rows or an object with a 'data' array".to_string(),
                ));
            }
        },
        _ => {
            return Err(ParseError::InvalidPayload(
                "expected an array of rows or an object with a 'data' array".to_string(),
            ));
        }
    };

    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let Value::Object(map) = item else {
            return Err(ParseError::InvalidPayload(
                "row entries must be objects".to_string(),
            ));
        };

        let mut row = RawRow::new();
        for (key, value) in map {
            match value {
                Value::String(s) => row.insert(key, s),
                Value::Number(n) => row.insert(key, &n.to_string()),
                Value::Bool(b) => row.insert(key, if *b { "true" } else { "false" }),
                // Nulls and nested structures carry no row data.
                _ => {}
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Parse and normalize an API payload in one step.
pub fn import_api(payload: &str, benchmarks: &Benchmarks) -> Result<Batch, ParseError> {
    let rows = rows_from_json(payload)?;
    Ok(normalize_rows(&rows, Source::Api, benchmarks))
}
