//! Application state owned by the consumer loop.

use std::time::{Duration, Instant};

use tracing::{debug, error};

use crate::aggregate::SentimentTable;
use crate::processor::{self, ProcessError};

/// How much of an undecodable payload to quote in the error log.
const PAYLOAD_PREVIEW_LEN: usize = 120;

/// All mutable state: the aggregate table plus loop counters.
pub struct App {
    /// Per-category running averages.
    pub table: SentimentTable,
    /// Topic being consumed, for display.
    pub topic: String,
    /// Process start, for uptime display.
    pub start: Instant,
    /// Messages pulled from the stream.
    pub messages_received: u64,
    /// Messages that updated the table.
    pub messages_applied: u64,
    /// Messages dropped by the decoder.
    pub messages_dropped: u64,
    /// Rolling messages-per-second estimate.
    pub throughput: f64,
    /// Set when the user asked to quit.
    pub quit_requested: bool,

    last_received: u64,
    last_tp_time: Instant,
}

impl App {
    /// Creates empty state for a consumer of `topic`.
    #[must_use]
    pub fn new(topic: String) -> Self {
        Self {
            table: SentimentTable::new(),
            topic,
            start: Instant::now(),
            messages_received: 0,
            messages_applied: 0,
            messages_dropped: 0,
            throughput: 0.0,
            quit_requested: false,
            last_received: 0,
            last_tp_time: Instant::now(),
        }
    }

    /// Decodes one payload into the table, counting and logging the outcome.
    ///
    /// Decode failures are terminal for the message only; the table is left
    /// exactly as it was and the loop moves on.
    pub fn ingest(&mut self, payload: &[u8]) {
        self.messages_received += 1;
        match processor::process_payload(&mut self.table, payload) {
            Ok(applied) => {
                self.messages_applied += 1;
                debug!(
                    category = %applied.category,
                    sentiment = applied.sentiment,
                    average = applied.average,
                    count = applied.message_count,
                    "applied message"
                );
            }
            Err(e) => {
                self.messages_dropped += 1;
                log_drop(&e, payload);
            }
        }
    }

    /// Refreshes the rolling throughput estimate over a one second window.
    pub fn tick(&mut self) {
        let elapsed = self.last_tp_time.elapsed().as_secs_f64();
        if elapsed >= 1.0 {
            self.throughput =
                self.messages_received.saturating_sub(self.last_received) as f64 / elapsed;
            self.last_received = self.messages_received;
            self.last_tp_time = Instant::now();
        }
    }

    /// Time since the consumer started.
    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.start.elapsed()
    }
}

fn log_drop(e: &ProcessError, payload: &[u8]) {
    let preview: String = String::from_utf8_lossy(payload)
        .chars()
        .take(PAYLOAD_PREVIEW_LEN)
        .collect();
    error!(error = %e, payload = %preview, "dropping message");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_counts_applied_and_dropped() {
        let mut app = App::new("t".into());
        app.ingest(br#"{"category": "tech", "sentiment": 1}"#);
        app.ingest(b"not valid json");
        app.ingest(b"[]");
        app.ingest(br#"{"sentiment": 2}"#);

        assert_eq!(app.messages_received, 4);
        assert_eq!(app.messages_applied, 2);
        assert_eq!(app.messages_dropped, 2);
        assert_eq!(app.table.len(), 2);
    }

    #[test]
    fn dropped_messages_do_not_touch_the_table() {
        let mut app = App::new("t".into());
        app.ingest(br#"{"category": "tech", "sentiment": 1}"#);
        let before: Vec<(String, f64)> = app
            .table
            .averages()
            .iter()
            .map(|(c, a)| (c.to_string(), *a))
            .collect();
        app.ingest(b"{broken");
        let after: Vec<(String, f64)> = app
            .table
            .averages()
            .iter()
            .map(|(c, a)| (c.to_string(), *a))
            .collect();
        assert_eq!(after, before);
    }
}
