//! Continuum configuration
//!
//! Loaded from TOML at startup, falls back to defaults if no config file
//! exists. Backend settings may be overridden from the environment.

use continuum_llm::LlmConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuumConfig {
    /// Completion backend used by agents.
    pub llm: LlmConfig,
    /// Orchestrator tuning.
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Cancel a pending completion after this many milliseconds. Unset waits
    /// for the backend indefinitely.
    pub completion_timeout_ms: Option<u64>,
    /// Keep at most this many explainability entries.
    pub trace_limit: Option<usize>,
}

impl ContinuumConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}; using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!("No config at {}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Load, then let `LLM_*` environment variables override the backend section.
    pub fn load_with_env(path: Option<&Path>) -> Self {
        let mut config = path.map(Self::load).unwrap_or_default();
        config.llm.apply_env();
        config
    }

    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}
