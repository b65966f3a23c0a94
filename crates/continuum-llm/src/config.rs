//! Backend configuration: the provider/key/model triple

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    None,
    Ollama,
    Anthropic,
    #[serde(rename = "openai")]
    OpenAi,
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "ollama" => Ok(Self::Ollama),
            "anthropic" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAi),
            other => Err(format!("unknown llm provider: {}", other)),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Ollama => write!(f, "ollama"),
            Self::Anthropic => write!(f, "anthropic"),
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Which backend to use. `none` disables completions entirely.
    pub provider: Provider,
    /// API key for hosted providers. Ignored by ollama.
    pub api_key: String,
    /// Model name. Empty selects the provider default.
    pub model: String,
    /// Override the provider endpoint (scheme + host, no path).
    pub base_url: Option<String>,
    /// Max output tokens for hosted providers.
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Provider::None,
            api_key: String::new(),
            model: String::new(),
            base_url: None,
            max_tokens: 1024,
        }
    }
}

impl LlmConfig {
    pub const ENV_PROVIDER: &'static str = "LLM_PROVIDER";
    pub const ENV_API_KEY: &'static str = "LLM_API_KEY";
    pub const ENV_MODEL: &'static str = "LLM_MODEL";
    /// Dotenv file read from the working directory.
    pub const ENV_FILE: &'static str = ".env";

    /// Build from `LLM_PROVIDER`, `LLM_API_KEY`, `LLM_MODEL` alone.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Let the environment override whatever the config file said. Keys
    /// missing from the process environment are taken from `./.env`.
    pub fn apply_env(&mut self) {
        self.apply_env_file(Path::new(Self::ENV_FILE));
    }

    /// Like [`LlmConfig::apply_env`] with an explicit dotenv path. Variables
    /// already set in the process win over the file.
    pub fn apply_env_file(&mut self, path: &Path) {
        let file = read_env_file(path);
        self.apply_vars(|key| std::env::var(key).ok().or_else(|| file.get(key).cloned()));
    }

    /// Apply overrides from any variable source. Unknown providers degrade to `none`.
    pub fn apply_vars<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = get(Self::ENV_PROVIDER) {
            self.provider = provider.parse().unwrap_or_else(|e: String| {
                warn!("{}; completions disabled", e);
                Provider::None
            });
        }
        if let Some(key) = get(Self::ENV_API_KEY) {
            self.api_key = key;
        }
        if let Some(model) = get(Self::ENV_MODEL) {
            self.model = model;
        }
    }

    pub fn enabled(&self) -> bool {
        self.provider != Provider::None
    }

    /// `model` if set, otherwise `default`.
    pub fn model_or(&self, default: &str) -> String {
        if self.model.is_empty() {
            default.to_string()
        } else {
            self.model.clone()
        }
    }

    pub fn base_url_or(&self, default: &str) -> String {
        self.base_url
            .as_deref()
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| default.to_string())
    }
}

/// Parse a dotenv file without touching the process environment. A missing
/// file is empty; malformed lines are skipped.
pub fn read_env_file(path: &Path) -> HashMap<String, String> {
    match dotenvy::from_path_iter(path) {
        Ok(iter) => iter.filter_map(|item| item.ok()).collect(),
        Err(_) => HashMap::new(),
    }
}

impl fmt::Display for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.enabled() {
            return write!(f, "none (deterministic mode)");
        }
        write!(f, "{}/{}", self.provider, self.model)
    }
}
