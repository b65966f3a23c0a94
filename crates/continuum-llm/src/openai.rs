//! OpenAI chat completions backend

use crate::config::LlmConfig;
use crate::provider::{check_status, CompletionBackend, LlmError, LlmResult};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const OPENAI_DEFAULT_MODEL: &str = "gpt-4o";

pub struct OpenAiBackend {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiBackend {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_string(),
            model: OPENAI_DEFAULT_MODEL.to_string(),
            max_tokens: 1024,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        let mut backend = Self::new(config.api_key.clone())
            .with_base_url(config.base_url_or(OPENAI_BASE_URL));
        backend.model = config.model_or(OPENAI_DEFAULT_MODEL);
        backend.max_tokens = config.max_tokens;
        backend
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
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// `choices[0].message.content`; no choices is an empty answer.
pub fn parse_chat_response(body: &Value) -> LlmResult<String> {
    let choices = body
        .get("choices")
        .and_then(Value::as_array)
        .ok_or_else(|| LlmError::InvalidResponse("missing `choices` array".into()))?;
    let Some(first) = choices.first() else {
        return Ok(String::new());
    };
    first
        .pointer("/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| LlmError::InvalidResponse("choice has no message content".into()))
}

#[async_trait::async_trait]
impl CompletionBackend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    async fn try_complete(&self, prompt: &str) -> LlmResult<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };
        debug!("OpenAI request: model={}", self.model);

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let response = check_status("openai", response).await?;
        let value: Value = response.json().await?;
        parse_chat_response(&value)
    }
}
