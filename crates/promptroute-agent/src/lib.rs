//! Backend clients for PromptRoute.
//!
//! Thin, stateless HTTP clients for the hosted model APIs the adapters call:
//! chat completion over the Anthropic and OpenAI protocols, and image
//! synthesis over the OpenAI Images API.

pub mod error;
pub mod images;
pub mod llm;

pub use error::{AgentError, Result};
pub use images::{ImageClient, ImageClientConfig};
pub use llm::{ChatRequest, LlmClient, LlmClientConfig, LlmProvider, Message, Role};
