//! Live per-category sentiment dashboard for the buzzline message stream.
//!
//! Pulls JSON messages from a pub/sub topic, keeps a running average of the
//! `sentiment` field per `category`, and redraws a terminal bar chart after
//! every message. The stream transport sits behind [`source::StreamSource`]:
//! the default build runs against an embedded synthetic generator, and the
//! `kafka` cargo feature adds a real Kafka consumer.

pub mod aggregate;
pub mod app;
pub mod config;
pub mod generator;
#[cfg(feature = "kafka")]
pub mod kafka;
pub mod processor;
pub mod source;
pub mod tui;
pub mod types;
