//! Kafka administration helpers shared across services that need to ensure
//! topics are available before producing or consuming messages.

use std::collections::BTreeSet;

use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication, TopicResult};
use rdkafka::client::DefaultClientContext;
use rdkafka::error::RDKafkaErrorCode;
use rdkafka::ClientConfig;
use tracing::info;

use crate::config::StreamsParams;
use crate::dto::PipelineStep;
use crate::error::{ProvisionError, Result};
use crate::topics::parse_topic_reference;

/// Ensures that every topic referenced by a set of pipeline steps exists on
/// the broker before the pipeline starts processing messages.
///
/// Provisioning is idempotent: topics that already exist are treated as
/// successfully created, so the same pipeline definition can be applied
/// repeatedly (restart, redeploy) without failing.
pub struct TopicProvisioner {
    admin: AdminClient<DefaultClientContext>,
    streams: StreamsParams,
}

impl TopicProvisioner {
    /// Builds the admin client for the given broker. No network I/O happens
    /// until a provisioning call is made.
    pub fn new(broker: &str, streams: StreamsParams) -> Result<Self> {
        let admin: AdminClient<DefaultClientContext> = ClientConfig::new()
            .set("bootstrap.servers", broker)
            .create()?;
        Ok(Self { admin, streams })
    }

    /// Ensure that every topic referenced by `steps` (sources, sink and
    /// triggers, with field qualifiers stripped) exists on the broker.
    ///
    /// Fails on the first topic the broker refuses to create for any reason
    /// other than it already existing; topics created before that point are
    /// left in place.
    pub async fn ensure_topics_exist(&self, steps: &[PipelineStep]) -> Result<()> {
        let topics = required_topics(steps);
        info!(?topics, "required pipeline topics");
        let names: Vec<&str> = topics.iter().map(String::as_str).collect();
        self.ensure_topics(&names).await
    }

    /// Ensure that the given topics exist, creating each with the configured
    /// partition count, replication factor and message size limit.
    ///
    /// All creations are submitted as a single batch request; per-topic
    /// results are reconciled once the broker answers.
    pub async fn ensure_topics(&self, topics: &[&str]) -> Result<()> {
        if topics.is_empty() {
            return Ok(());
        }
        let max_message_bytes = self.streams.max_message_size_bytes.to_string();
        let new_topics: Vec<NewTopic> = topics
            .iter()
            .map(|&topic| {
                NewTopic::new(
                    topic,
                    self.streams.num_partitions,
                    TopicReplication::Fixed(self.streams.replication_factor),
                )
                .set("max.message.bytes", &max_message_bytes)
            })
            .collect();
        let results = self
            .admin
            .create_topics(new_topics.iter(), &AdminOptions::new())
            .await?;
        reconcile_creation_results(results)
    }
}

/// The deduplicated set of bare topic names referenced by the given steps.
fn required_topics(steps: &[PipelineStep]) -> BTreeSet<String> {
    steps
        .iter()
        .flat_map(|step| {
            step.sources
                .iter()
                .chain(std::iter::once(&step.sink))
                .chain(step.triggers.iter())
        })
        .map(|reference| parse_topic_reference(reference).0.to_string())
        .collect()
}

fn reconcile_creation_results(results: Vec<TopicResult>) -> Result<()> {
    for result in results {
        match result {
            Ok(topic) => info!(%topic, "topic created"),
            Err((topic, RDKafkaErrorCode::TopicAlreadyExists)) => {
                info!(%topic, "topic already exists")
            }
            Err((topic, code)) => return Err(ProvisionError::TopicCreation { topic, code }),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(sources: &[&str], sink: &str, triggers: &[&str]) -> PipelineStep {
        PipelineStep {
            sources: sources.iter().map(|s| s.to_string()).collect(),
            sink: sink.into(),
            triggers: triggers.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn collects_sources_sink_and_triggers() {
        let steps = vec![step(&["a"], "b", &[]), step(&["b"], "c", &["a"])];
        let topics = required_topics(&steps);
        assert_eq!(
            topics.into_iter().collect::<Vec<_>>(),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn deduplicates_across_steps() {
        // "x" is a sink in one step and a source in another
        let steps = vec![step(&[], "x", &[]), step(&["x"], "y", &["x"])];
        let topics = required_topics(&steps);
        assert_eq!(topics.len(), 2);
        assert!(topics.contains("x"));
        assert!(topics.contains("y"));
    }

    #[test]
    fn strips_field_qualifiers() {
        let steps = vec![step(&["orders:amount"], "scored", &[])];
        let topics = required_topics(&steps);
        assert!(topics.contains("orders"));
        assert!(!topics.contains("orders:amount"));
    }

    #[test]
    fn empty_steps_need_no_topics() {
        assert!(required_topics(&[]).is_empty());
    }

    #[test]
    fn already_exists_counts_as_success() {
        let results = vec![
            Ok("a".to_string()),
            Err(("b".to_string(), RDKafkaErrorCode::TopicAlreadyExists)),
        ];
        assert!(reconcile_creation_results(results).is_ok());
    }

    #[test]
    fn other_failures_propagate_with_cause() {
        let results = vec![
            Ok("a".to_string()),
            Err(("b".to_string(), RDKafkaErrorCode::InvalidReplicationFactor)),
        ];
        match reconcile_creation_results(results) {
            Err(ProvisionError::TopicCreation { topic, code }) => {
                assert_eq!(topic, "b");
                assert_eq!(code, RDKafkaErrorCode::InvalidReplicationFactor);
            }
            other => panic!("expected TopicCreation error, got {other:?}"),
        }
    }
}
