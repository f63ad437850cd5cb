use rdkafka::{
    consumer::{Consumer, StreamConsumer},
    ClientConfig, Message,
};
use shared::config::Settings;
use shared::dto::PipelineUpdate;
use shared::kafka::TopicProvisioner;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const UPDATE_TOPIC: &str = "pipeline-updates";

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let settings = Settings::new()?;
    let provisioner =
        TopicProvisioner::new(&settings.message_broker_url, settings.streams_params())?;

    // the control topic must exist before we can subscribe to it
    provisioner.ensure_topics(&[UPDATE_TOPIC]).await?;

    let consumer: StreamConsumer = ClientConfig::new()
        .set("group.id", "pipeline-provisioner")
        .set("bootstrap.servers", &settings.message_broker_url)
        .create()
        .map_err(|e| {
            error!(%e, "failed to create kafka consumer");
            e
        })?;

    consumer.subscribe(&[UPDATE_TOPIC]).map_err(|e| {
        error!(%e, "failed to subscribe to topic pipeline-updates");
        e
    })?;

    info!(
        "pipeline-provisioner started (broker={})",
        settings.message_broker_url
    );

    loop {
        match consumer.recv().await {
            Err(e) => {
                error!(%e, "kafka error");
                continue;
            }
            Ok(m) => {
                let Some(Ok(payload)) = m.payload_view::<str>() else {
                    warn!("received message without valid UTF-8 payload");
                    continue;
                };

                let update: PipelineUpdate = match serde_json::from_str(payload) {
                    Ok(u) => u,
                    Err(e) => {
                        warn!(%e, "failed to parse PipelineUpdate payload");
                        continue;
                    }
                };

                info!(
                    pipeline = %update.pipeline,
                    version = update.version,
                    steps = update.steps.len(),
                    "provisioning topics for pipeline update"
                );

                match provisioner.ensure_topics_exist(&update.steps).await {
                    Ok(()) => info!(pipeline = %update.pipeline, "pipeline topics ready"),
                    Err(e) => {
                        error!(pipeline = %update.pipeline, %e, "topic provisioning failed")
                    }
                }
            }
        }
    }
}
