//! Error types for crew assembly and execution.

use thiserror::Error;

/// Errors raised by an LLM provider call.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key was configured for the provider.
    #[error("{provider} API key not set. Set the {env_var} environment variable.")]
    MissingApiKey {
        provider: &'static str,
        env_var: &'static str,
    },

    /// Transport-level failure (connect, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-retryable error status.
    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// Every attempt failed with a retryable error.
    #[error("{provider} API call failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        provider: &'static str,
        attempts: u32,
        last: String,
    },

    /// The response body did not have the expected shape.
    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),

    /// The response body was not valid JSON.
    #[error("Failed to parse LLM response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while assembling or running a crew.
#[derive(Debug, Error)]
pub enum CrewError {
    /// A crew needs at least one agent and one task.
    #[error("A crew requires at least one agent and one task")]
    EmptyCrew,

    /// A task is bound to an agent that the crew does not declare.
    #[error("Task '{task}' is assigned to agent '{role}', which is not part of the crew")]
    UnknownAgent { task: String, role: String },

    /// The agent returned no text for a task.
    #[error("Task '{task}' produced an empty output")]
    EmptyOutput { task: String },

    /// The underlying LLM call failed.
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// Environment configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
