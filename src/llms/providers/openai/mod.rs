//! OpenAI native completion provider.
//!
//! Talks to the Chat Completions API (`POST {base}/chat/completions`). Any
//! OpenAI-compatible server can be targeted by overriding the base URL.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::llms::base_llm::{usage_from_json, BaseLLM, BaseLLMState, LLMMessage, LLMResponse};
use crate::llms::providers::utils::send_with_retries;
use crate::utilities::errors::LlmError;

/// Default OpenAI API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI native completion implementation.
///
/// # Example
///
/// ```ignore
/// let provider = OpenAICompletion::new("gpt-4o-mini", None, None);
/// let response = provider.call(&[LLMMessage::user("Hello")]).await?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAICompletion {
    /// Shared base LLM state.
    #[serde(flatten)]
    pub state: BaseLLMState,

    /// Organization ID for multi-tenant access.
    pub organization: Option<String>,
}

impl OpenAICompletion {
    /// Create a new OpenAI completion provider.
    ///
    /// # Arguments
    ///
    /// * `model` - OpenAI model name (e.g., "gpt-4o-mini").
    /// * `api_key` - Optional API key (defaults to OPENAI_API_KEY env var).
    /// * `base_url` - Optional custom base URL.
    pub fn new(
        model: impl Into<String>,
        api_key: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        let mut state = BaseLLMState::new(model, "openai");
        state.api_key = api_key.or_else(|| std::env::var("OPENAI_API_KEY").ok());
        state.base_url = base_url;

        Self {
            state,
            organization: std::env::var("OPENAI_ORGANIZATION").ok(),
        }
    }

    /// Get the API base URL.
    pub fn api_base_url(&self) -> String {
        self.state.base_url_or(DEFAULT_BASE_URL)
    }

    /// Build the request body for the Chat Completions API.
    pub fn build_request_body(&self, messages: &[LLMMessage]) -> Value {
        let mut body = serde_json::json!({
            "model": self.state.model,
            "messages": messages,
        });

        if let Some(temp) = self.state.temperature {
            body["temperature"] = serde_json::json!(temp);
        }
        if let Some(max_tokens) = self.state.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }

    /// Parse a Chat Completions API response.
    fn parse_response(&self, response: &Value) -> Result<LLMResponse, LlmError> {
        let message = response
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|choice| choice.get("message"))
            .ok_or_else(|| LlmError::MalformedResponse("no choices in OpenAI response".to_string()))?;

        let text = message
            .get("content")
            .and_then(|c| c.as_str())
            .unwrap_or("")
            .to_string();

        let usage = usage_from_json(response.get("usage"));
        log::debug!(
            "OpenAI token usage: prompt={}, completion={}, total={}",
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total_tokens,
        );

        Ok(LLMResponse { text, usage })
    }
}

#[async_trait]
impl BaseLLM for OpenAICompletion {
    fn model(&self) -> &str {
        &self.state.model
    }

    fn provider(&self) -> &str {
        "openai"
    }

    async fn call(&self, messages: &[LLMMessage]) -> Result<LLMResponse, LlmError> {
        log::debug!(
            "OpenAICompletion.call: model={}, messages={}",
            self.state.model,
            messages.len(),
        );

        let api_key = self.state.api_key.as_deref().ok_or(LlmError::MissingApiKey {
            provider: "OpenAI",
            env_var: "OPENAI_API_KEY",
        })?;

        let body = self.build_request_body(messages);
        let endpoint = format!("{}/chat/completions", self.api_base_url());
        let client = reqwest::Client::builder()
            .timeout(self.state.timeout)
            .build()?;

        let response_json = send_with_retries("OpenAI", self.state.retry_policy(), || {
            let mut request = client
                .post(&endpoint)
                .bearer_auth(api_key)
                .json(&body);
            if let Some(ref org) = self.organization {
                request = request.header("OpenAI-Organization", org);
            }
            request
        })
        .await?;

        self.parse_response(&response_json)
    }
}
