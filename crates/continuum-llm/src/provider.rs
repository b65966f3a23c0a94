//! Completion backend trait

use crate::config::{LlmConfig, Provider};
use crate::{AnthropicBackend, OllamaBackend, OpenAiBackend};
use std::sync::Arc;
use tracing::{error, warn};

/// Result type for backend operations
pub type LlmResult<T> = Result<T, LlmError>;

/// Backend error types. None of these cross the agent boundary:
/// [`CompletionBackend::complete`] turns them into an empty response.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("rate limited: retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("cancelled")]
    Cancelled,

    #[error("backend disabled")]
    Disabled,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Capability interface the agents depend on.
#[async_trait::async_trait]
pub trait CompletionBackend: Send + Sync {
    fn name(&self) -> &str;

    fn enabled(&self) -> bool {
        true
    }

    /// One non-streaming completion for `prompt`.
    async fn try_complete(&self, prompt: &str) -> LlmResult<String>;

    /// Best-effort completion: any failure degrades to an empty string.
    async fn complete(&self, prompt: &str) -> String {
        if !self.enabled() {
            return String::new();
        }
        match self.try_complete(prompt).await {
            Ok(text) => text,
            Err(e) => degraded(self.name(), &e),
        }
    }
}

/// Log a failed or cancelled completion and return the empty response that stands in for it.
pub fn degraded(backend: &str, error: &LlmError) -> String {
    warn!(backend, "completion failed, degrading to empty response: {}", error);
    String::new()
}

/// The "none" provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledBackend;

#[async_trait::async_trait]
impl CompletionBackend for DisabledBackend {
    fn name(&self) -> &str {
        "none"
    }

    fn enabled(&self) -> bool {
        false
    }

    async fn try_complete(&self, _prompt: &str) -> LlmResult<String> {
        Err(LlmError::Disabled)
    }
}

/// Select the backend named by `config.provider`.
pub fn build_backend(config: &LlmConfig) -> Arc<dyn CompletionBackend> {
    match config.provider {
        Provider::None => Arc::new(DisabledBackend),
        Provider::Ollama => Arc::new(OllamaBackend::from_config(config)),
        Provider::Anthropic => Arc::new(AnthropicBackend::from_config(config)),
        Provider::OpenAi => Arc::new(OpenAiBackend::from_config(config)),
    }
}

/// Map a non-success HTTP status to an error, passing successes through.
pub(crate) async fn check_status(
    provider: &str,
    response: reqwest::Response,
) -> LlmResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await.unwrap_or_default();
    error!("{} error {}: {}", provider, status, error_text);

    match status.as_u16() {
        401 => Err(LlmError::AuthFailed(error_text)),
        429 => Err(LlmError::RateLimited { retry_after_ms: 60_000 }),
        _ => Err(LlmError::RequestFailed(format!("{}: {}", status, error_text))),
    }
}
