//! Environment-backed configuration, loaded once at startup.

use std::time::Duration;

/// Topic consumed when `PROJECT_TOPIC` is unset.
pub const DEFAULT_TOPIC: &str = "buzzline-topic";

/// Which stream transport backs the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    /// In-process synthetic generator, no external dependencies.
    Embedded,
    /// Kafka consumer (requires the `kafka` cargo feature).
    Kafka,
}

impl SourceMode {
    /// Parses a mode string; anything other than `kafka` selects embedded.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "kafka" => Self::Kafka,
            _ => Self::Embedded,
        }
    }
}

impl std::fmt::Display for SourceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded"),
            Self::Kafka => write!(f, "kafka"),
        }
    }
}

/// Runtime configuration for the consumer.
#[derive(Debug, Clone)]
pub struct Config {
    /// Stream topic to subscribe to.
    pub topic: String,
    /// Transport selection.
    pub mode: SourceMode,
    /// Kafka bootstrap servers (kafka mode only).
    pub brokers: String,
    /// Kafka consumer group id (kafka mode only).
    pub group_id: String,
    /// Emission cadence of the embedded generator.
    pub gen_interval: Duration,
    /// Bounded pause after each redraw, during which input is polled.
    pub render_yield: Duration,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// Call after `dotenv::dotenv()` so an `.env` file can supply values.
    #[must_use]
    pub fn from_env() -> Self {
        let topic = std::env::var("PROJECT_TOPIC").unwrap_or_else(|_| DEFAULT_TOPIC.into());
        let mode = SourceMode::parse(&std::env::var("SENTIMENT_MODE").unwrap_or_default());
        let brokers =
            std::env::var("KAFKA_BROKERS").unwrap_or_else(|_| "localhost:9092".into());
        let group_id =
            std::env::var("GROUP_ID").unwrap_or_else(|_| "buzzline-sentiment".into());
        let gen_interval_ms: u64 = std::env::var("GEN_INTERVAL_MS")
            .unwrap_or_else(|_| "250".into())
            .parse()
            .unwrap_or(250);
        let render_yield_ms: u64 = std::env::var("RENDER_YIELD_MS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .unwrap_or(10);

        Self {
            topic,
            mode,
            brokers,
            group_id,
            gen_interval: Duration::from_millis(gen_interval_ms),
            render_yield: Duration::from_millis(render_yield_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parsing() {
        assert_eq!(SourceMode::parse("kafka"), SourceMode::Kafka);
        assert_eq!(SourceMode::parse("KAFKA"), SourceMode::Kafka);
        assert_eq!(SourceMode::parse("embedded"), SourceMode::Embedded);
        assert_eq!(SourceMode::parse(""), SourceMode::Embedded);
        assert_eq!(SourceMode::parse("something-else"), SourceMode::Embedded);
    }

    #[test]
    fn mode_display_round_trips() {
        assert_eq!(SourceMode::parse(&SourceMode::Kafka.to_string()), SourceMode::Kafka);
        assert_eq!(
            SourceMode::parse(&SourceMode::Embedded.to_string()),
            SourceMode::Embedded
        );
    }

    #[test]
    fn from_env_applies_defaults_and_overrides() {
        // Single test mutating the environment so parallel tests don't race.
        std::env::remove_var("PROJECT_TOPIC");
        std::env::remove_var("SENTIMENT_MODE");
        std::env::remove_var("GEN_INTERVAL_MS");
        let config = Config::from_env();
        assert_eq!(config.topic, DEFAULT_TOPIC);
        assert_eq!(config.mode, SourceMode::Embedded);
        assert_eq!(config.gen_interval, Duration::from_millis(250));
        assert_eq!(config.render_yield, Duration::from_millis(10));

        std::env::set_var("PROJECT_TOPIC", "custom-topic");
        std::env::set_var("GEN_INTERVAL_MS", "not-a-number");
        let config = Config::from_env();
        assert_eq!(config.topic, "custom-topic");
        assert_eq!(config.gen_interval, Duration::from_millis(250));

        std::env::remove_var("PROJECT_TOPIC");
        std::env::remove_var("GEN_INTERVAL_MS");
    }
}
