//! Stream source abstraction and the mode-dispatch factory.
//!
//! The consumer pulls from a [`StreamSource`] one message at a time and
//! releases it through [`StreamSource::close`] during shutdown. Transports
//! implement the trait: the embedded generator always, Kafka behind the
//! `kafka` cargo feature.

use async_trait::async_trait;

use crate::config::{Config, SourceMode};

/// One raw message pulled from the stream.
#[derive(Debug, Clone)]
pub struct StreamMessage {
    /// Raw message bytes, expected to be UTF-8 JSON.
    pub payload: Vec<u8>,
    /// Topic the message was read from.
    pub topic: String,
    /// Source partition, 0 for transports without partitioning.
    pub partition: i32,
    /// Offset within the partition.
    pub offset: i64,
}

/// Errors from a stream transport.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Could not establish or subscribe the underlying connection.
    #[error("failed to connect to stream: {0}")]
    ConnectionFailed(String),

    /// A pull from the stream failed at the transport level.
    #[error("failed to pull message: {0}")]
    ReceiveFailed(String),

    /// The embedded generator could not encode a synthetic event.
    #[error("failed to encode synthetic event: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Blocking-pull handle over a subscribed topic.
#[async_trait]
pub trait StreamSource: Send {
    /// Waits for the next message. `Ok(None)` means the stream ended.
    async fn next_message(&mut self) -> Result<Option<StreamMessage>, SourceError>;

    /// Releases the transport's resources. Called once during shutdown.
    async fn close(&mut self) -> Result<(), SourceError>;
}

/// Builds the stream source named by the configuration.
pub fn create_stream_source(
    config: &Config,
) -> Result<Box<dyn StreamSource>, SourceError> {
    match config.mode {
        SourceMode::Embedded => Ok(Box::new(crate::generator::EmbeddedSource::new(
            &config.topic,
            config.gen_interval,
        ))),
        #[cfg(feature = "kafka")]
        SourceMode::Kafka => Ok(Box::new(crate::kafka::KafkaStreamSource::connect(config)?)),
        #[cfg(not(feature = "kafka"))]
        SourceMode::Kafka => Err(SourceError::ConnectionFailed(
            "kafka mode requires building with the `kafka` feature".into(),
        )),
    }
}
