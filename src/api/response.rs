//! Export response envelope
//!
//! Success: `{"count": <int>, "results": [ ... ]}`.
//! Failure: `{"status": "error", "message": "..."}`.

use crate::constants::api::MAX_COUNT;
use crate::error::{Error, Result};
use crate::record::RawRecord;
use serde_json::Value;
use tracing::warn;

const DEFAULT_API_ERROR: &str = "Unknown API error";

/// A validated export body
#[derive(Debug, Clone, PartialEq)]
pub struct ExportResponse {
    /// Record count advertised by the server
    pub count: u64,
    pub results: Vec<RawRecord>,
}

impl ExportResponse {
    /// Whether the server may have cut the result set short
    pub fn may_be_truncated(&self) -> bool {
        self.count >= MAX_COUNT
    }
}

fn required<'a>(object: &'a serde_json::Map<String, Value>, key: &str) -> Result<&'a Value> {
    object
        .get(key)
        .ok_or_else(|| Error::Validation(format!("missing required field: {}", key)))
}

fn count_of(value: &Value) -> Result<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| Error::Validation(format!("count is not a non-negative integer: {}", value)))
}

/// Check a decoded export body and pull out its records
///
/// The two non-fatal conditions (a count at the server's page limit, and a
/// count that disagrees with the number of results) are logged as warnings.
pub fn validate_export(value: Value) -> Result<ExportResponse> {
    let Value::Object(mut object) = value else {
        return Err(Error::Validation("expected a JSON object".to_string()));
    };

    if object.get("status").and_then(Value::as_str) == Some("error") {
        let message = object
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_API_ERROR);
        return Err(Error::Api(message.to_string()));
    }

    let count = count_of(required(&object, "count")?)?;
    required(&object, "results")?;

    let results = match object.remove("results") {
        Some(Value::Array(entries)) => entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| match entry {
                Value::Object(record) => Ok(record),
                other => Err(Error::Validation(format!(
                    "result {} is not an object: {}",
                    i, other
                ))),
            })
            .collect::<Result<Vec<_>>>()?,
        _ => return Err(Error::Validation("results is not a list".to_string())),
    };

    let response = ExportResponse { count, results };

    if response.may_be_truncated() {
        warn!(
            count,
            max = MAX_COUNT,
            "Result count reached the API maximum; results may be truncated"
        );
    }
    if count != response.results.len() as u64 {
        warn!(
            count,
            results = response.results.len(),
            "Result count does not match number of results"
        );
    }

    Ok(response)
}

/// Decode and validate a raw export body
pub fn parse_export(body: &[u8]) -> Result<ExportResponse> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| Error::Validation(format!("response is not valid JSON: {}", e)))?;
    validate_export(value)
}
