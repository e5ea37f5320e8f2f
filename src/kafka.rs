//! Kafka-backed stream source on an rdkafka `StreamConsumer`.
//!
//! Connection setup, group membership, and offset management live entirely
//! in rdkafka; this wrapper exposes the narrow blocking-pull surface the
//! consumer loop needs.

use async_trait::async_trait;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use rdkafka::ClientConfig;
use tracing::info;

use crate::config::Config;
use crate::source::{SourceError, StreamMessage, StreamSource};

/// [`StreamSource`] consuming a single Kafka topic.
pub struct KafkaStreamSource {
    consumer: StreamConsumer,
    topic: String,
}

impl KafkaStreamSource {
    /// Creates a consumer and subscribes it to the configured topic.
    pub fn connect(config: &Config) -> Result<Self, SourceError> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("group.id", &config.group_id)
            .set("bootstrap.servers", &config.brokers)
            .set("enable.auto.commit", "true")
            .set("auto.offset.reset", "earliest")
            .set("session.timeout.ms", "6000")
            .create()
            .map_err(|e| {
                SourceError::ConnectionFailed(format!("failed to create consumer: {e}"))
            })?;

        consumer.subscribe(&[config.topic.as_str()]).map_err(|e| {
            SourceError::ConnectionFailed(format!("failed to subscribe: {e}"))
        })?;

        info!(
            brokers = %config.brokers,
            topic = %config.topic,
            group_id = %config.group_id,
            "opened Kafka stream source"
        );

        Ok(Self {
            consumer,
            topic: config.topic.clone(),
        })
    }
}

#[async_trait]
impl StreamSource for KafkaStreamSource {
    async fn next_message(&mut self) -> Result<Option<StreamMessage>, SourceError> {
        loop {
            match self.consumer.recv().await {
                Ok(msg) => {
                    // Tombstones and other keyed nulls have no payload to decode
                    let Some(payload) = msg.payload() else { continue };
                    return Ok(Some(StreamMessage {
                        payload: payload.to_vec(),
                        topic: msg.topic().to_string(),
                        partition: msg.partition(),
                        offset: msg.offset(),
                    }));
                }
                Err(e) => return Err(SourceError::ReceiveFailed(e.to_string())),
            }
        }
    }

    async fn close(&mut self) -> Result<(), SourceError> {
        self.consumer.unsubscribe();
        info!(topic = %self.topic, "closed Kafka stream source");
        Ok(())
    }
}
