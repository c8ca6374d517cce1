//! LLM layer.
//!
//! - [`base_llm`] - The trait every LLM implementation follows, plus the
//!   message/response types and shared provider state
//! - [`providers`] - Native HTTP providers (OpenAI, Anthropic)

pub mod base_llm;
pub mod providers;

pub use base_llm::{BaseLLM, BaseLLMState, LLMMessage, LLMResponse};
