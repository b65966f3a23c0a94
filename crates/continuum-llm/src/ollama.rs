//! Local inference through an Ollama server

use crate::config::LlmConfig;
use crate::provider::{check_status, CompletionBackend, LlmError, LlmResult};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

const OLLAMA_BASE_URL: &str = "http://localhost:11434";
const OLLAMA_DEFAULT_MODEL: &str = "llama3";

pub struct OllamaBackend {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaBackend {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: OLLAMA_BASE_URL.to_string(),
            model: model.into(),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(config.model_or(OLLAMA_DEFAULT_MODEL)).with_base_url(config.base_url_or(OLLAMA_BASE_URL))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Extract the generated text from a `/api/generate` body.
pub fn parse_generate_response(body: &Value) -> LlmResult<String> {
    body.get("response")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| LlmError::InvalidResponse("missing `response` field".into()))
}

#[async_trait::async_trait]
impl CompletionBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn try_complete(&self, prompt: &str) -> LlmResult<String> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };
        debug!("Ollama request: model={}", self.model);

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await?;
        let response = check_status("ollama", response).await?;
        let value: Value = response.json().await?;
        parse_generate_response(&value)
    }
}
