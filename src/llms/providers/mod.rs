//! LLM provider implementations.
//!
//! Each provider implements the [`BaseLLM`](crate::llms::base_llm::BaseLLM)
//! trait and handles authentication, request formatting and response parsing
//! specific to that provider.
//!
//! | Provider | Module | Endpoint |
//! |----------|--------|----------|
//! | OpenAI | [`openai`] | `POST {base}/chat/completions` |
//! | Anthropic | [`anthropic`] | `POST {base}/v1/messages` |
//!
//! The [`utils`] module holds the retrying HTTP send loop they share.

pub mod anthropic;
pub mod openai;
pub mod utils;
