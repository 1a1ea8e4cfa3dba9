//! Code generation adapter backed by the Anthropic Messages API.

use async_trait::async_trait;
use promptroute_agent::{ChatRequest, LlmClient};
use promptroute_kernel::{ProviderAdapter, ProviderKind, ProviderPayload};

use crate::backend::Backend;
use crate::config::ProviderSettings;

const SYSTEM_PROMPT: &str = "\
You are a highly intelligent AI assistant. Your main goal is to assist with \
code generation and general inquiries.
Default to Python for code examples unless another language is requested.

For coding-related questions, format your answer clearly with:
- A brief introduction
- The code in proper code blocks with language specification (```python, ```javascript, etc.)
- A conclusion with explanation

For general questions, provide complete and helpful responses.";

/// Answers coding prompts.  Also serves the `deepseek` alias.
pub struct CodeAdapter {
    client: Backend<LlmClient>,
    max_tokens: u32,
    temperature: f32,
}

impl CodeAdapter {
    pub fn new(settings: &ProviderSettings) -> Self {
        Self {
            client: Backend::connect("anthropic", LlmClient::new(settings.anthropic_client())),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }
}

#[async_trait]
impl ProviderAdapter for CodeAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Code
    }

    async fn generate(&self, prompt: &str) -> ProviderPayload {
        let client = match self.client.get() {
            Ok(client) => client,
            Err(payload) => return payload,
        };

        let request = ChatRequest::with_system(SYSTEM_PROMPT, prompt)
            .max_tokens(self.max_tokens)
            .temperature(self.temperature);

        match client.chat(&request).await {
            Ok(reply) => ProviderPayload::PlainResponse {
                response: reply.trim().to_owned(),
            },
            Err(e) => {
                tracing::error!(adapter = "code", error = %e, "code backend call failed");
                ProviderPayload::error(format!("An unexpected error occurred: {e}"))
            }
        }
    }
}
