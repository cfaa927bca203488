//! Raw reads returned by a remote store

use serde_json::Value;
use std::collections::HashMap;

/// Unordered bag of named sensor fields as stored remotely
pub type RawSnapshot = HashMap<String, Value>;

/// Result of one read against a remote store
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The key holds a structured value
    Success(RawSnapshot),
    /// The key exists but holds no data
    Empty,
    /// The transport failed (timeout, connectivity, decode error)
    Failure(String),
}

impl FetchOutcome {
    /// Classify a decoded JSON document.
    ///
    /// `null` and `{}` are empty, objects are successful reads and any other
    /// JSON type is treated as a decode failure.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => FetchOutcome::Empty,
            Value::Object(map) if map.is_empty() => FetchOutcome::Empty,
            Value::Object(map) => FetchOutcome::Success(map.into_iter().collect()),
            other => FetchOutcome::Failure(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            )),
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        FetchOutcome::Failure(reason.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
