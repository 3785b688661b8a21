use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Engine tunables. Loaded from an optional TOML file and environment variables
/// with the prefix `ROUTEGRAPH__`, e.g. `ROUTEGRAPH__PUBLISH__WRITE_TIMEOUT_MS=2000`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub publish: PublishConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidationConfig {
    /// Nodes whose id contains this marker are editor placeholders and never validated.
    #[serde(default = "default_placeholder_marker")]
    pub placeholder_marker: String,
    /// Hypotheses at or below this many characters draw a warning.
    #[serde(default = "default_min_hypothesis_chars")]
    pub min_hypothesis_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PublishConfig {
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    #[serde(default = "default_write_timeout_ms")]
    pub write_timeout_ms: u64,
}

fn default_placeholder_marker() -> String {
    "placeholder".to_string()
}
fn default_min_hypothesis_chars() -> usize {
    10
}
fn default_key_prefix() -> String {
    "campaign".to_string()
}
fn default_write_timeout_ms() -> u64 {
    5_000
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            placeholder_marker: default_placeholder_marker(),
            min_hypothesis_chars: default_min_hypothesis_chars(),
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
            write_timeout_ms: default_write_timeout_ms(),
        }
    }
}

impl EngineConfig {
    /// Builds the configuration from defaults, then `path` (if any), then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let config = builder
            .add_source(
                config::Environment::with_prefix("ROUTEGRAPH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
