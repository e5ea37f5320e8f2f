//! Wire types for the sentiment stream.

use serde::Serialize;

/// One social-style message as produced by the embedded generator.
///
/// `category` and `sentiment` are optional on the wire; consumers fall back
/// to `"unknown"` and `0` respectively when a field is absent.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentEvent {
    /// Topic bucket for aggregation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Sentiment score in `[-1, 1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<f64>,
    /// Free-form message text, ignored by the aggregator.
    pub message: String,
    /// Author handle, ignored by the aggregator.
    pub author: String,
    /// Event timestamp in epoch milliseconds.
    pub ts: i64,
}
