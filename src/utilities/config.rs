//! Runtime configuration read from the environment.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `CREW_LLM` | `provider/model` or a bare model name | `openai/gpt-4o-mini` |
//! | `CREW_LLM_BASE_URL` | provider base URL override | provider default |
//! | `CREW_LLM_TEMPERATURE` | sampling temperature | unset |
//! | `CREW_LLM_MAX_TOKENS` | response token cap | unset |
//! | `CREW_LLM_TIMEOUT_SECS` | per-request timeout | 120 |
//! | `CREW_LLM_MAX_RETRIES` | retries after the first attempt | 2 |
//! | `CREW_STUB_RESULT` | skip the LLM and return this text | unset |
//!
//! Provider credentials (`OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, ...) are read
//! by the providers themselves.

use std::str::FromStr;
use std::time::Duration;

use crate::llms::base_llm::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use crate::utilities::errors::CrewError;

/// Default model when `CREW_LLM` is not set.
pub const DEFAULT_LLM: &str = "openai/gpt-4o-mini";

/// Settings for one crew run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Model string, `provider/model` or bare.
    pub llm: String,
    /// Base URL override for the provider.
    pub base_url: Option<String>,
    /// Sampling temperature.
    pub temperature: Option<f64>,
    /// Response token cap.
    pub max_tokens: Option<u32>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// When set, the crew is answered with this text instead of calling a model.
    pub stub_result: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm: DEFAULT_LLM.to_string(),
            base_url: None,
            temperature: None,
            max_tokens: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            stub_result: None,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, CrewError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CrewError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            llm: get("CREW_LLM").unwrap_or(defaults.llm),
            base_url: get("CREW_LLM_BASE_URL"),
            temperature: parse_opt(&get, "CREW_LLM_TEMPERATURE")?,
            max_tokens: parse_opt(&get, "CREW_LLM_MAX_TOKENS")?,
            timeout: parse_opt(&get, "CREW_LLM_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            max_retries: parse_opt(&get, "CREW_LLM_MAX_RETRIES")?.unwrap_or(defaults.max_retries),
            stub_result: lookup("CREW_STUB_RESULT"),
        })
    }
}

fn parse_opt<T, G>(get: &G, key: &str) -> Result<Option<T>, CrewError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| CrewError::Config(format!("{}={:?}: {}", key, raw, e)))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, CrewError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.llm, "openai/gpt-4o-mini");
        assert_eq!(s.timeout, Duration::from_secs(120));
        assert_eq!(s.max_retries, 2);
    }

    #[test]
    fn test_overrides() {
        let s = settings(&[
            ("CREW_LLM", "anthropic/claude-sonnet-4-5"),
            ("CREW_LLM_BASE_URL", "http://localhost:4000"),
            ("CREW_LLM_TEMPERATURE", "0.3"),
            ("CREW_LLM_MAX_TOKENS", "512"),
            ("CREW_LLM_TIMEOUT_SECS", "30"),
            ("CREW_LLM_MAX_RETRIES", "0"),
            ("CREW_STUB_RESULT", "OK"),
        ])
        .unwrap();
        assert_eq!(s.llm, "anthropic/claude-sonnet-4-5");
        assert_eq!(s.base_url.as_deref(), Some("http://localhost:4000"));
        assert_eq!(s.temperature, Some(0.3));
        assert_eq!(s.max_tokens, Some(512));
        assert_eq!(s.timeout, Duration::from_secs(30));
        assert_eq!(s.max_retries, 0);
        assert_eq!(s.stub_result.as_deref(), Some("OK"));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let s = settings(&[("CREW_LLM", "  "), ("CREW_LLM_MAX_TOKENS", "")]).unwrap();
        assert_eq!(s.llm, DEFAULT_LLM);
        assert_eq!(s.max_tokens, None);
    }

    #[test]
    fn test_invalid_number() {
        let err = settings(&[("CREW_LLM_TIMEOUT_SECS", "soon")]).unwrap_err();
        match err {
            CrewError::Config(msg) => assert!(msg.starts_with("CREW_LLM_TIMEOUT_SECS=\"soon\"")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
