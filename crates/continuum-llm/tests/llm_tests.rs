//! Tests for continuum-llm: configuration, backend selection, response parsing,
//! and degradation of failed completions

use continuum_llm::anthropic::parse_messages_response;
use continuum_llm::ollama::parse_generate_response;
use continuum_llm::openai::parse_chat_response;
use continuum_llm::*;
use serde_json::json;
use std::collections::HashMap;

// Nothing listens here; connections are refused immediately.
const DEAD_URL: &str = "http://127.0.0.1:1";

// ===========================================================================
// Provider / LlmConfig
// ===========================================================================

#[test]
fn provider_parses_known_names() {
    assert_eq!("none".parse::<Provider>().unwrap(), Provider::None);
    assert_eq!("".parse::<Provider>().unwrap(), Provider::None);
    assert_eq!("Ollama".parse::<Provider>().unwrap(), Provider::Ollama);
    assert_eq!(" anthropic ".parse::<Provider>().unwrap(), Provider::Anthropic);
    assert_eq!("openai".parse::<Provider>().unwrap(), Provider::OpenAi);
    assert!("bard".parse::<Provider>().is_err());
}

#[test]
fn provider_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Provider::OpenAi).unwrap(), r#""openai""#);
    assert_eq!(serde_json::to_string(&Provider::None).unwrap(), r#""none""#);
    let back: Provider = serde_json::from_str(r#""anthropic""#).unwrap();
    assert_eq!(back, Provider::Anthropic);
}

#[test]
fn config_defaults_to_disabled() {
    let config = LlmConfig::default();
    assert!(!config.enabled());
    assert_eq!(config.max_tokens, 1024);
    assert_eq!(config.to_string(), "none (deterministic mode)");
}

#[test]
fn config_display_when_enabled() {
    let config = LlmConfig {
        provider: Provider::Ollama,
        model: "llama3".into(),
        ..Default::default()
    };
    assert!(config.enabled());
    assert_eq!(config.to_string(), "ollama/llama3");
}

#[test]
fn config_apply_vars_overrides() {
    let vars: HashMap<&str, &str> = [
        ("LLM_PROVIDER", "anthropic"),
        ("LLM_API_KEY", "sk-test"),
        ("LLM_MODEL", "claude-x"),
    ]
    .into_iter()
    .collect();

    let mut config = LlmConfig::default();
    config.apply_vars(|k| vars.get(k).map(|v| v.to_string()));
    assert_eq!(config.provider, Provider::Anthropic);
    assert_eq!(config.api_key, "sk-test");
    assert_eq!(config.model, "claude-x");
}

#[test]
fn config_apply_vars_leaves_unset_keys() {
    let mut config = LlmConfig {
        provider: Provider::OpenAi,
        model: "gpt-4o".into(),
        ..Default::default()
    };
    config.apply_vars(|_| None);
    assert_eq!(config.provider, Provider::OpenAi);
    assert_eq!(config.model, "gpt-4o");
}

#[test]
fn config_unknown_provider_degrades_to_none() {
    let mut config = LlmConfig {
        provider: Provider::Ollama,
        ..Default::default()
    };
    config.apply_vars(|k| (k == "LLM_PROVIDER").then(|| "mystery".to_string()));
    assert_eq!(config.provider, Provider::None);
}

#[test]
fn env_file_parses_without_touching_process_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(
        &path,
        "# backend\nLLM_PROVIDER=ollama\nLLM_MODEL=\"mistral\"\n\nCONTINUUM_ENV_FILE_ONLY=1\n",
    )
    .unwrap();

    let vars = read_env_file(&path);
    assert_eq!(vars.get("LLM_PROVIDER").map(String::as_str), Some("ollama"));
    assert_eq!(vars.get("LLM_MODEL").map(String::as_str), Some("mistral"));
    assert!(std::env::var("CONTINUUM_ENV_FILE_ONLY").is_err());

    assert!(read_env_file(&dir.path().join("absent.env")).is_empty());
}

#[test]
fn env_file_fills_only_unset_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(&path, "LLM_PROVIDER=ollama\nLLM_MODEL=mistral\n").unwrap();
    let file = read_env_file(&path);
    let process: HashMap<&str, &str> = [("LLM_MODEL", "llama3.1")].into_iter().collect();

    let mut config = LlmConfig::default();
    config.apply_vars(|k| {
        process
            .get(k)
            .map(|v| v.to_string())
            .or_else(|| file.get(k).cloned())
    });
    assert_eq!(config.provider, Provider::Ollama);
    assert_eq!(config.model, "llama3.1");
}

#[test]
fn config_model_and_url_fallbacks() {
    let mut config = LlmConfig::default();
    assert_eq!(config.model_or("llama3"), "llama3");
    assert_eq!(config.base_url_or("http://x"), "http://x");
    config.model = "mistral".into();
    config.base_url = Some("http://host:1234/".into());
    assert_eq!(config.model_or("llama3"), "mistral");
    assert_eq!(config.base_url_or("http://x"), "http://host:1234");
}

// ===========================================================================
// build_backend
// ===========================================================================

#[test]
fn build_backend_selects_variant() {
    let cases = [
        (Provider::None, "none", false),
        (Provider::Ollama, "ollama", true),
        (Provider::Anthropic, "anthropic", true),
        (Provider::OpenAi, "openai", true),
    ];
    for (provider, name, enabled) in cases {
        let config = LlmConfig {
            provider,
            ..Default::default()
        };
        let backend = build_backend(&config);
        assert_eq!(backend.name(), name);
        assert_eq!(backend.enabled(), enabled);
    }
}

#[test]
fn backends_pick_provider_default_models() {
    let config = LlmConfig::default();
    assert_eq!(OllamaBackend::from_config(&config).model(), "llama3");
    assert_eq!(AnthropicBackend::from_config(&config).model(), "claude-sonnet-4-20250514");
    assert_eq!(OpenAiBackend::from_config(&config).model(), "gpt-4o");
}

// ===========================================================================
// Response parsing
// ===========================================================================

#[test]
fn parse_ollama_response() {
    let body = json!({"model": "llama3", "response": "findings", "done": true});
    assert_eq!(parse_generate_response(&body).unwrap(), "findings");
    assert!(matches!(
        parse_generate_response(&json!({"error": "no model"})),
        Err(LlmError::InvalidResponse(_))
    ));
}

#[test]
fn parse_anthropic_response() {
    let body = json!({
        "id": "msg_1",
        "content": [{"type": "text", "text": "structured findings"}],
        "stop_reason": "end_turn"
    });
    assert_eq!(parse_messages_response(&body).unwrap(), "structured findings");
    assert_eq!(parse_messages_response(&json!({"content": []})).unwrap(), "");
    assert_eq!(parse_messages_response(&json!({})).unwrap(), "");
}

#[test]
fn parse_openai_response() {
    let body = json!({
        "choices": [{"index": 0, "message": {"role": "assistant", "content": "ok"}}]
    });
    assert_eq!(parse_chat_response(&body).unwrap(), "ok");
    assert_eq!(parse_chat_response(&json!({"choices": []})).unwrap(), "");
    assert!(parse_chat_response(&json!({"error": {"message": "bad key"}})).is_err());
}

// ===========================================================================
// Degradation
// ===========================================================================

#[tokio::test]
async fn disabled_backend_returns_empty() {
    let backend = DisabledBackend;
    assert!(matches!(backend.try_complete("hi").await, Err(LlmError::Disabled)));
    assert_eq!(backend.complete("hi").await, "");
}

#[tokio::test]
async fn unreachable_backends_degrade_to_empty() {
    let backends: Vec<Box<dyn CompletionBackend>> = vec![
        Box::new(OllamaBackend::new("llama3").with_base_url(DEAD_URL)),
        Box::new(AnthropicBackend::new("sk-test").with_base_url(DEAD_URL)),
        Box::new(OpenAiBackend::new("sk-test").with_base_url(DEAD_URL)),
    ];
    for backend in backends {
        assert!(matches!(backend.try_complete("hi").await, Err(LlmError::Network(_))));
        assert_eq!(backend.complete("hi").await, "", "backend {}", backend.name());
    }
}

#[test]
fn cancelled_completion_degrades_to_empty() {
    assert_eq!(LlmError::Cancelled.to_string(), "cancelled");
    assert_eq!(degraded("ollama", &LlmError::Cancelled), "");
}

#[test]
fn llm_error_display() {
    assert_eq!(LlmError::Disabled.to_string(), "backend disabled");
    assert_eq!(
        LlmError::RateLimited { retry_after_ms: 60_000 }.to_string(),
        "rate limited: retry after 60000ms"
    );
}
