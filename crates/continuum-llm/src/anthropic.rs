//! Anthropic Messages API backend

use crate::config::LlmConfig;
use crate::provider::{check_status, CompletionBackend, LlmError, LlmResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const ANTHROPIC_DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

pub struct AnthropicBackend {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicBackend {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: ANTHROPIC_BASE_URL.to_string(),
            model: ANTHROPIC_DEFAULT_MODEL.to_string(),
            max_tokens: 1024,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(config.api_key.clone())
            .with_base_url(config.base_url_or(ANTHROPIC_BASE_URL))
            .with_model(config.model_or(ANTHROPIC_DEFAULT_MODEL))
            .with_max_tokens(config.max_tokens)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [UserMessage<'a>; 1],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Text of the first content block. An empty `content` array is an empty answer.
pub fn parse_messages_response(body: &serde_json::Value) -> LlmResult<String> {
    let parsed: MessagesResponse = serde_json::from_value(body.clone())
        .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;
    match parsed.content.into_iter().next() {
        None => Ok(String::new()),
        Some(block) => block
            .text
            .ok_or_else(|| LlmError::InvalidResponse("first content block has no text".into())),
    }
}

#[async_trait::async_trait]
impl CompletionBackend for AnthropicBackend {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn try_complete(&self, prompt: &str) -> LlmResult<String> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [UserMessage {
                role: "user",
                content: prompt,
            }],
        };
        debug!("Anthropic request: model={}", self.model);

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;
        let response = check_status("anthropic", response).await?;
        let value: serde_json::Value = response.json().await?;
        parse_messages_response(&value)
    }
}
