use serde::{Deserialize, Serialize};

/// Topic dependencies declared by a single pipeline step. The entries are
/// topic references and may carry a field qualifier (see [`crate::topics`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineStep {
    #[serde(default)]
    pub sources: Vec<String>,
    pub sink: String,
    #[serde(default)]
    pub triggers: Vec<String>,
}

/// A pipeline definition as published on the control topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineUpdate {
    pub pipeline: String,
    #[serde(default)]
    pub version: u32,
    pub steps: Vec<PipelineStep>,
}
