//! LLM client layer.
//!
//! - [`types`] -- Provider-agnostic request and message types.
//! - [`client`] -- HTTP client speaking the Anthropic and OpenAI protocols.

pub mod client;
pub mod types;

pub use client::{
    ANTHROPIC_BASE_URL, GEMINI_BASE_URL, LlmClient, LlmClientConfig, LlmProvider,
    OPENAI_BASE_URL,
};
pub use types::{ChatRequest, Message, Role};
