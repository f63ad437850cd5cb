use serde::Deserialize;

fn default_message_broker_url() -> String {
    "kafka:9092".into()
}

fn default_num_partitions() -> i32 {
    1
}

fn default_replication_factor() -> i32 {
    1
}

fn default_max_message_size_bytes() -> i64 {
    1_000_000
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_message_broker_url")]
    pub message_broker_url: String,
    #[serde(default = "default_num_partitions")]
    pub num_partitions: i32,
    #[serde(default = "default_replication_factor")]
    pub replication_factor: i32,
    #[serde(default = "default_max_message_size_bytes")]
    pub max_message_size_bytes: i64,
}

/// The per-topic streaming parameters, applied uniformly to every topic a
/// pipeline references.
#[derive(Debug, Clone, Copy)]
pub struct StreamsParams {
    pub num_partitions: i32,
    pub replication_factor: i32,
    pub max_message_size_bytes: i64,
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            // try_parsing so numeric fields accept env var strings
            .add_source(config::Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn streams_params(&self) -> StreamsParams {
        StreamsParams {
            num_partitions: self.num_partitions,
            replication_factor: self.replication_factor,
            max_message_size_bytes: self.max_message_size_bytes,
        }
    }
}
