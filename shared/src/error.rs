use rdkafka::error::{KafkaError, RDKafkaErrorCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    /// The admin request itself could not be issued or answered.
    #[error("kafka admin request failed: {0}")]
    Admin(#[from] KafkaError),
    /// The broker rejected the creation of a single topic for a reason other
    /// than the topic already existing.
    #[error("failed to create topic {topic}: {code}")]
    TopicCreation { topic: String, code: RDKafkaErrorCode },
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
