//! Decodes raw payloads and folds them into the sentiment table.
//!
//! Decode failures never touch the table; the caller decides whether to
//! log and continue (the consumer loop always does).

use serde_json::Value;

use crate::aggregate::SentimentTable;

/// Category used when a message carries no `category` field.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Why a payload was rejected without updating the table.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// Payload is not valid JSON.
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Payload is valid JSON but not an object.
    #[error("expected a JSON object but got: {actual}")]
    NotAnObject {
        /// JSON type of the decoded value.
        actual: &'static str,
    },
}

/// Outcome of a successfully applied message.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    /// Category the message was attributed to.
    pub category: String,
    /// Sentiment value that was added (0 when the field was absent).
    pub sentiment: f64,
    /// Category message count after this update.
    pub message_count: u64,
    /// Category average after this update.
    pub average: f64,
}

/// Parses one raw payload and attributes it to its category.
///
/// A missing `category` falls back to [`UNKNOWN_CATEGORY`]; a missing or
/// non-numeric `sentiment` contributes 0 and still increments the count.
pub fn process_payload(
    table: &mut SentimentTable,
    payload: &[u8],
) -> Result<Applied, ProcessError> {
    let value: Value = serde_json::from_slice(payload)?;
    let Value::Object(fields) = value else {
        return Err(ProcessError::NotAnObject {
            actual: json_type_name(&value),
        });
    };

    let category = fields
        .get("category")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_CATEGORY);
    let sentiment = fields
        .get("sentiment")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    let stats = table.record(category, sentiment);
    Ok(Applied {
        category: category.to_string(),
        sentiment,
        message_count: stats.message_count,
        average: stats.average(),
    })
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
