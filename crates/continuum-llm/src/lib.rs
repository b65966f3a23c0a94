//! Continuum LLM - optional completion backends for agents
//!
//! The pipeline only sees [`CompletionBackend`]. Provider transports are
//! selected from [`LlmConfig`] by [`build_backend`]; the default is the
//! disabled backend, which keeps every run deterministic.

pub mod anthropic;
pub mod config;
pub mod ollama;
pub mod openai;
pub mod provider;

pub use anthropic::AnthropicBackend;
pub use config::{read_env_file, LlmConfig, Provider};
pub use ollama::OllamaBackend;
pub use openai::OpenAiBackend;
pub use provider::{build_backend, degraded, CompletionBackend, DisabledBackend, LlmError, LlmResult};
