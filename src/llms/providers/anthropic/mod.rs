//! Anthropic native completion provider.
//!
//! Talks to the Messages API (`POST {base}/v1/messages`). System messages are
//! lifted out of the conversation into the top-level `system` parameter, and
//! `max_tokens` is always sent since the API requires it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::llms::base_llm::{usage_from_json, BaseLLM, BaseLLMState, LLMMessage, LLMResponse};
use crate::llms::providers::utils::send_with_retries;
use crate::utilities::errors::LlmError;

/// Default Anthropic API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Default response token cap when none is configured.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Anthropic native completion implementation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicCompletion {
    /// Shared base LLM state.
    #[serde(flatten)]
    pub state: BaseLLMState,

    /// Anthropic API version header.
    pub anthropic_version: String,
}

impl AnthropicCompletion {
    /// Create a new Anthropic completion provider.
    ///
    /// # Arguments
    ///
    /// * `model` - Anthropic model name (e.g., "claude-sonnet-4-5").
    /// * `api_key` - Optional API key (defaults to ANTHROPIC_API_KEY env var).
    /// * `base_url` - Optional custom base URL.
    pub fn new(
        model: impl Into<String>,
        api_key: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        let mut state = BaseLLMState::new(model, "anthropic");
        state.api_key = api_key.or_else(|| std::env::var("ANTHROPIC_API_KEY").ok());
        state.base_url = base_url;

        Self {
            state,
            anthropic_version: "2023-06-01".to_string(),
        }
    }

    /// Get the API base URL.
    pub fn api_base_url(&self) -> String {
        self.state.base_url_or(DEFAULT_BASE_URL)
    }

    /// Split system messages from the conversation.
    ///
    /// Multiple system messages are joined with a blank line.
    fn extract_system_and_messages(&self, messages: &[LLMMessage]) -> (Option<String>, Vec<Value>) {
        let mut system_parts: Vec<&str> = Vec::new();
        let mut formatted: Vec<Value> = Vec::new();

        for msg in messages {
            if msg.role == "system" {
                system_parts.push(&msg.content);
            } else {
                formatted.push(serde_json::json!({
                    "role": msg.role,
                    "content": msg.content,
                }));
            }
        }

        let system = if system_parts.is_empty() {
            None
        } else {
            Some(system_parts.join("\n\n"))
        };

        (system, formatted)
    }

    /// Build the request body for the Messages API.
    pub fn build_request_body(&self, messages: &[LLMMessage]) -> Value {
        let (system, formatted_messages) = self.extract_system_and_messages(messages);

        let mut body = serde_json::json!({
            "model": self.state.model,
            "max_tokens": self.state.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            "messages": formatted_messages,
        });

        if let Some(system_text) = system {
            body["system"] = Value::String(system_text);
        }
        if let Some(temp) = self.state.temperature {
            body["temperature"] = serde_json::json!(temp);
        }

        body
    }

    /// Parse a Messages API response, concatenating its `text` blocks.
    fn parse_response(&self, response: &Value) -> Result<LLMResponse, LlmError> {
        let content = response
            .get("content")
            .and_then(|c| c.as_array())
            .ok_or_else(|| {
                LlmError::MalformedResponse("no content array in Anthropic response".to_string())
            })?;

        let mut text_parts: Vec<&str> = Vec::new();
        for block in content {
            let block_type = block.get("type").and_then(|t| t.as_str()).unwrap_or("");
            match block_type {
                "text" => {
                    if let Some(text) = block.get("text").and_then(|t| t.as_str()) {
                        text_parts.push(text);
                    }
                }
                other => {
                    log::debug!("Skipping Anthropic content block type: {}", other);
                }
            }
        }

        let usage = usage_from_json(response.get("usage"));
        log::debug!(
            "Anthropic token usage: input={}, output={}",
            usage.prompt_tokens,
            usage.completion_tokens,
        );

        Ok(LLMResponse {
            text: text_parts.join(""),
            usage,
        })
    }
}

#[async_trait]
impl BaseLLM for AnthropicCompletion {
    fn model(&self) -> &str {
        &self.state.model
    }

    fn provider(&self) -> &str {
        "anthropic"
    }

    async fn call(&self, messages: &[LLMMessage]) -> Result<LLMResponse, LlmError> {
        log::debug!(
            "AnthropicCompletion.call: model={}, messages={}",
            self.state.model,
            messages.len(),
        );

        let api_key = self.state.api_key.as_deref().ok_or(LlmError::MissingApiKey {
            provider: "Anthropic",
            env_var: "ANTHROPIC_API_KEY",
        })?;

        let body = self.build_request_body(messages);
        let endpoint = format!("{}/v1/messages", self.api_base_url());
        let client = reqwest::Client::builder()
            .timeout(self.state.timeout)
            .build()?;

        let response_json = send_with_retries("Anthropic", self.state.retry_policy(), || {
            client
                .post(&endpoint)
                .header("x-api-key", api_key)
                .header("anthropic-version", &self.anthropic_version)
                .json(&body)
        })
        .await?;

        self.parse_response(&response_json)
    }
}
