use crate::publish::ValidationReport;
use thiserror::Error;

/// Violations of the graph's single-entry-point invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphStructureError {
    #[error("Campaign graph has no traffic node")]
    MissingTrafficNode,

    #[error("Campaign graph has {} traffic nodes, expected exactly one: {}", ids.len(), ids.join(", "))]
    MultipleTrafficNodes { ids: Vec<String> },
}

/// Errors that can occur during the compilation phase.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Structure(#[from] GraphStructureError),

    #[error("Failed to serialize compiled config: {0}")]
    Serialization(String),
}

/// Errors raised while reading an editor document into a typed graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphParseError {
    #[error("Failed to parse graph JSON: {0}")]
    Json(String),

    #[error("Node '{node_id}' has an unknown type: '{kind}'")]
    UnknownNodeKind { node_id: String, kind: String },

    #[error("Node '{node_id}' has an invalid {kind} payload: {message}")]
    InvalidPayload {
        node_id: String,
        kind: String,
        message: String,
    },

    #[error("Node id '{0}' appears more than once")]
    DuplicateNodeId(String),
}

/// Failure of a single write to the config store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Config store unavailable: {0}")]
    Unavailable(String),

    #[error("Config store rejected the write: {0}")]
    Rejected(String),

    #[error("Write timed out after {0} ms")]
    Timeout(u64),
}

/// Errors that stop a publish before anything is written.
#[derive(Error, Debug, Clone)]
pub enum PublishError {
    #[error(
        "Campaign cannot be published: {} critical issue(s), {} error(s)",
        .0.summary.critical_errors,
        .0.summary.errors
    )]
    Blocked(Box<ValidationReport>),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("No publish targets were given")]
    NoTargets,
}

/// Errors loading the engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}
