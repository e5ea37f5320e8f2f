//! Embedded synthetic sentiment stream with per-category random-walk moods.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::source::{SourceError, StreamMessage, StreamSource};
use crate::types::SentimentEvent;

/// Categories emitted by the embedded stream.
pub const CATEGORIES: &[&str] = &["tech", "sports", "food", "travel", "gaming", "news"];

const AUTHORS: &[&str] = &["ana", "bo", "cam", "dee", "eli", "fynn"];

const VERBS: &[&str] = &["loved", "tried", "reviewed", "skipped", "shared", "found"];

/// Probability that an optional field is omitted from a message.
const OMIT_FIELD_PROB: f64 = 0.05;

/// Per-category mood state for random-walk generation.
struct CategoryState {
    name: &'static str,
    mood: f64,
}

impl CategoryState {
    fn step(&mut self, rng: &mut impl Rng) {
        // Random walk clamped to the sentiment range
        let drift: f64 = rng.gen_range(-1.0..=1.0) * 0.15;
        self.mood = (self.mood + drift).clamp(-1.0, 1.0);
    }
}

/// In-process [`StreamSource`] that emits one JSON payload per interval.
pub struct EmbeddedSource {
    states: Vec<CategoryState>,
    topic: String,
    interval: Duration,
    // Absolute deadline so a pull cancelled by the caller's select loop
    // resumes the same wait instead of restarting it.
    next_emit: tokio::time::Instant,
    offset: i64,
}

impl EmbeddedSource {
    /// Creates a generator publishing to `topic` every `interval`.
    #[must_use]
    pub fn new(topic: &str, interval: Duration) -> Self {
        let states = CATEGORIES
            .iter()
            .map(|&name| CategoryState { name, mood: 0.0 })
            .collect();
        Self {
            states,
            topic: topic.to_string(),
            interval,
            next_emit: tokio::time::Instant::now() + interval,
            offset: -1,
        }
    }

    fn next_event(&mut self) -> SentimentEvent {
        let mut rng = rand::thread_rng();
        let idx = rng.gen_range(0..self.states.len());
        let state = &mut self.states[idx];
        state.step(&mut rng);

        let verb = VERBS[rng.gen_range(0..VERBS.len())];
        let author = AUTHORS[rng.gen_range(0..AUTHORS.len())];

        // Occasionally drop an optional field to exercise consumer defaults
        let category = (!rng.gen_bool(OMIT_FIELD_PROB)).then(|| state.name.to_string());
        let sentiment = (!rng.gen_bool(OMIT_FIELD_PROB)).then(|| round2(state.mood));

        SentimentEvent {
            category,
            sentiment,
            message: format!("{author} {verb} something in {}", state.name),
            author: author.to_string(),
            ts: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[async_trait]
impl StreamSource for EmbeddedSource {
    async fn next_message(&mut self) -> Result<Option<StreamMessage>, SourceError> {
        tokio::time::sleep_until(self.next_emit).await;
        self.next_emit = tokio::time::Instant::now() + self.interval;
        let event = self.next_event();
        let payload = serde_json::to_vec(&event)?;
        self.offset += 1;
        Ok(Some(StreamMessage {
            payload,
            topic: self.topic.clone(),
            partition: 0,
            offset: self.offset,
        }))
    }

    async fn close(&mut self) -> Result<(), SourceError> {
        Ok(())
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
