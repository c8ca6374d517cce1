//! Base LLM trait.
//!
//! Provides the trait all LLM providers implement, the message and response
//! types they exchange with the orchestrator, and the shared connection state
//! (model, credentials, sampling and retry settings) providers embed.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::llms::providers::utils::RetryPolicy;
use crate::types::usage_metrics::UsageMetrics;
use crate::utilities::errors::LlmError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// A single message in an LLM conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LLMMessage {
    /// Role of the message sender ("system", "user" or "assistant").
    pub role: String,
    /// Content of the message.
    pub content: String,
}

impl LLMMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Text answer of one LLM call together with the tokens it consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LLMResponse {
    pub text: String,
    pub usage: UsageMetrics,
}

// ---------------------------------------------------------------------------
// BaseLLM trait
// ---------------------------------------------------------------------------

/// Trait for LLM implementations.
///
/// Implementations own their transport and authentication. Custom
/// implementations (including test doubles) only need to answer a list of
/// messages with text.
#[async_trait]
pub trait BaseLLM: Send + Sync + fmt::Debug {
    /// Get the model identifier/name.
    fn model(&self) -> &str;

    /// Get the provider name.
    fn provider(&self) -> &str {
        "openai"
    }

    /// Call the LLM with the given messages.
    async fn call(&self, messages: &[LLMMessage]) -> Result<LLMResponse, LlmError>;
}

// ---------------------------------------------------------------------------
// BaseLLMState - shared state for LLM implementations
// ---------------------------------------------------------------------------

/// Shared state for LLM implementations.
///
/// Provides common fields that concrete providers embed and delegate to. The
/// API key is never serialized and is redacted from `Debug` output.
#[derive(Clone, Serialize, Deserialize)]
pub struct BaseLLMState {
    /// The model identifier/name.
    pub model: String,
    /// Optional temperature setting for response generation.
    pub temperature: Option<f64>,
    /// Maximum tokens in the response.
    pub max_tokens: Option<u32>,
    /// Optional API key.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Optional base URL for the API.
    pub base_url: Option<String>,
    /// Provider name (e.g., "openai", "anthropic").
    pub provider: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Retries after the first attempt for transient failures.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub retry_backoff: Duration,
}

impl BaseLLMState {
    /// Create a new `BaseLLMState` with the given model and provider names.
    pub fn new(model: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: None,
            max_tokens: None,
            api_key: None,
            base_url: None,
            provider: provider.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: Duration::from_secs(1),
        }
    }

    /// Retry policy derived from this state.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            initial_backoff: self.retry_backoff,
        }
    }

    /// Base URL, falling back to the provider default.
    pub fn base_url_or(&self, default: &str) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| default.to_string())
            .trim_end_matches('/')
            .to_string()
    }
}

impl fmt::Debug for BaseLLMState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseLLMState")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("provider", &self.provider)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff", &self.retry_backoff)
            .finish()
    }
}

/// Extract token usage from a provider `usage` object.
///
/// Field names differ between providers: OpenAI reports
/// `prompt_tokens`/`completion_tokens`, Anthropic `input_tokens`/`output_tokens`.
pub fn usage_from_json(usage: Option<&Value>) -> UsageMetrics {
    let fields: HashMap<&str, i64> = usage
        .and_then(|u| u.as_object())
        .map(|obj| {
            obj.iter()
                .filter_map(|(k, v)| v.as_i64().map(|n| (k.as_str(), n)))
                .collect()
        })
        .unwrap_or_default();

    let pick = |names: &[&str]| names.iter().find_map(|n| fields.get(n).copied()).unwrap_or(0);

    let prompt_tokens = pick(&["prompt_tokens", "input_tokens"]);
    let completion_tokens = pick(&["completion_tokens", "output_tokens"]);
    let cached_prompt_tokens = usage
        .and_then(|u| u.pointer("/prompt_tokens_details/cached_tokens"))
        .and_then(|v| v.as_i64())
        .unwrap_or_else(|| pick(&["cache_read_input_tokens"]));

    UsageMetrics {
        total_tokens: prompt_tokens + completion_tokens,
        prompt_tokens,
        cached_prompt_tokens,
        completion_tokens,
        successful_requests: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        assert_eq!(LLMMessage::system("s").role, "system");
        assert_eq!(LLMMessage::user("u").role, "user");
        assert_eq!(LLMMessage::user("a").content, "a");
    }

    #[test]
    fn test_state_defaults() {
        let state = BaseLLMState::new("gpt-4o-mini", "openai");
        assert_eq!(state.timeout, Duration::from_secs(120));
        assert_eq!(state.max_retries, 2);
        assert_eq!(state.base_url_or("https://api.openai.com/v1"), "https://api.openai.com/v1");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let mut state = BaseLLMState::new("m", "openai");
        state.base_url = Some("http://localhost:8080/v1/".to_string());
        assert_eq!(state.base_url_or("unused"), "http://localhost:8080/v1");
    }

    #[test]
    fn test_api_key_is_redacted() {
        let mut state = BaseLLMState::new("gpt-4o-mini", "openai");
        state.api_key = Some("sk-secret-value".to_string());

        let shown = format!("{:?}", state);
        assert!(!shown.contains("sk-secret-value"));
        assert!(shown.contains("<redacted>"));

        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("api_key").is_none());
        assert_eq!(json["model"], "gpt-4o-mini");
    }

    #[test]
    fn test_usage_from_openai_json() {
        let usage = serde_json::json!({
            "prompt_tokens": 12,
            "completion_tokens": 30,
            "total_tokens": 42,
            "prompt_tokens_details": { "cached_tokens": 4 }
        });
        let metrics = usage_from_json(Some(&usage));
        assert_eq!(metrics.prompt_tokens, 12);
        assert_eq!(metrics.completion_tokens, 30);
        assert_eq!(metrics.total_tokens, 42);
        assert_eq!(metrics.cached_prompt_tokens, 4);
        assert_eq!(metrics.successful_requests, 1);
    }

    #[test]
    fn test_usage_from_anthropic_json() {
        let usage = serde_json::json!({
            "input_tokens": 7,
            "output_tokens": 3,
            "cache_read_input_tokens": 2
        });
        let metrics = usage_from_json(Some(&usage));
        assert_eq!(metrics.prompt_tokens, 7);
        assert_eq!(metrics.completion_tokens, 3);
        assert_eq!(metrics.total_tokens, 10);
        assert_eq!(metrics.cached_prompt_tokens, 2);
    }

    #[test]
    fn test_usage_missing() {
        let metrics = usage_from_json(None);
        assert_eq!(metrics.total_tokens, 0);
        assert_eq!(metrics.successful_requests, 1);
    }
}
