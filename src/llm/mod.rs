//! Model routing.
//!
//! Resolves a model string such as `"openai/gpt-4o-mini"`,
//! `"anthropic/claude-sonnet-4-5"` or a bare `"gpt-4o"` into a configured
//! [`BaseLLM`] provider instance.

use std::fmt;

use crate::llms::base_llm::{BaseLLM, BaseLLMState};
use crate::llms::providers::anthropic::AnthropicCompletion;
use crate::llms::providers::openai::OpenAICompletion;
use crate::utilities::config::Settings;
use crate::utilities::errors::CrewError;

/// Anthropic model name prefixes.
pub const ANTHROPIC_PREFIXES: &[&str] = &["anthropic/", "claude-", "claude/"];

/// Supported provider families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// OpenAI or any OpenAI-compatible endpoint.
    OpenAI,
    /// Anthropic Messages API.
    Anthropic,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAI => write!(f, "openai"),
            Provider::Anthropic => write!(f, "anthropic"),
        }
    }
}

/// Split a model string into its provider and the model name sent on the wire.
///
/// An explicit `provider/` prefix wins. Without one, `claude` models route to
/// Anthropic and everything else to OpenAI. Unknown prefixes are treated as
/// OpenAI-compatible and keep the full string as the model name.
pub fn infer_provider(model: &str) -> (Provider, String) {
    let lower = model.to_lowercase();

    if let Some((prefix, rest)) = model.split_once('/') {
        match prefix.to_lowercase().as_str() {
            "openai" => return (Provider::OpenAI, rest.to_string()),
            "anthropic" | "claude" => return (Provider::Anthropic, rest.to_string()),
            other => {
                log::warn!(
                    "Unknown provider '{}', falling back to OpenAI-compatible",
                    other
                );
                return (Provider::OpenAI, model.to_string());
            }
        }
    }

    if ANTHROPIC_PREFIXES.iter().any(|p| lower.starts_with(p)) || lower.contains("claude") {
        (Provider::Anthropic, model.to_string())
    } else {
        (Provider::OpenAI, model.to_string())
    }
}

/// Create an LLM instance from run settings.
///
/// # Errors
///
/// Returns [`CrewError::Config`] when the model name is empty.
pub fn create_llm(settings: &Settings) -> Result<Box<dyn BaseLLM>, CrewError> {
    let (provider, model) = infer_provider(settings.llm.trim());
    if model.is_empty() {
        return Err(CrewError::Config(format!(
            "CREW_LLM={:?} does not name a model",
            settings.llm
        )));
    }

    log::debug!("Creating LLM instance: provider={}, model={}", provider, model);

    let apply = |state: &mut BaseLLMState| {
        state.temperature = settings.temperature;
        state.max_tokens = settings.max_tokens;
        state.timeout = settings.timeout;
        state.max_retries = settings.max_retries;
    };

    match provider {
        Provider::OpenAI => {
            let mut llm = OpenAICompletion::new(model, None, settings.base_url.clone());
            apply(&mut llm.state);
            Ok(Box::new(llm))
        }
        Provider::Anthropic => {
            let mut llm = AnthropicCompletion::new(model, None, settings.base_url.clone());
            apply(&mut llm.state);
            Ok(Box::new(llm))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_infer_provider_from_prefix() {
        assert_eq!(
            infer_provider("openai/gpt-4o"),
            (Provider::OpenAI, "gpt-4o".to_string())
        );
        assert_eq!(
            infer_provider("anthropic/claude-3"),
            (Provider::Anthropic, "claude-3".to_string())
        );
    }

    #[test]
    fn test_infer_provider_from_model_name() {
        assert_eq!(infer_provider("gpt-4o-mini").0, Provider::OpenAI);
        assert_eq!(infer_provider("claude-sonnet-4-5").0, Provider::Anthropic);
        assert_eq!(infer_provider("Claude-Opus").0, Provider::Anthropic);
    }

    #[test]
    fn test_infer_provider_unknown_prefix() {
        assert_eq!(
            infer_provider("groq/llama-3.1-70b"),
            (Provider::OpenAI, "groq/llama-3.1-70b".to_string())
        );
    }

    #[test]
    fn test_create_llm_applies_settings() {
        let settings = Settings {
            llm: "anthropic/claude-sonnet-4-5".to_string(),
            timeout: Duration::from_secs(9),
            ..Settings::default()
        };
        let llm = create_llm(&settings).unwrap();
        assert_eq!(llm.provider(), "anthropic");
        assert_eq!(llm.model(), "claude-sonnet-4-5");
    }

    #[test]
    fn test_create_llm_default_is_openai() {
        let llm = create_llm(&Settings::default()).unwrap();
        assert_eq!(llm.provider(), "openai");
        assert_eq!(llm.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_create_llm_rejects_empty_model() {
        let settings = Settings {
            llm: "openai/".to_string(),
            ..Settings::default()
        };
        assert!(matches!(create_llm(&settings), Err(CrewError::Config(_))));
    }
}
