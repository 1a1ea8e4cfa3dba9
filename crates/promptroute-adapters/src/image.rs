//! Image adapter: a language model expands the prompt, then the images API
//! renders it.

use async_trait::async_trait;
use promptroute_agent::{ChatRequest, ImageClient, LlmClient};
use promptroute_kernel::{ProviderAdapter, ProviderKind, ProviderPayload};

use crate::backend::Backend;
use crate::config::RouterConfig;

const EXPANSION_INSTRUCTIONS: &str = "\
Take the following prompt. The prompt may contain a command on generating an \
image. Expand it into a rich, detailed image prompt suitable for an image \
generation model. Include descriptions of scenery, style, atmosphere, \
lighting, and artistic tone. Reply with the expanded prompt only.";

pub struct ImageAdapter {
    expander: Backend<LlmClient>,
    renderer: Backend<ImageClient>,
    max_tokens: u32,
    temperature: f32,
}

impl ImageAdapter {
    /// Expansion uses the Gemini settings; rendering uses the OpenAI
    /// credential with the configured image model.
    pub fn new(config: &RouterConfig) -> Self {
        Self {
            expander: Backend::connect("gemini", LlmClient::new(config.gemini.openai_client())),
            renderer: Backend::connect("openai", ImageClient::new(config.image_client())),
            max_tokens: config.gemini.max_tokens,
            temperature: config.gemini.temperature,
        }
    }

    async fn expand(&self, prompt: &str) -> Result<String, ProviderPayload> {
        let client = self.expander.get()?;
        let request = ChatRequest::with_system(EXPANSION_INSTRUCTIONS, prompt)
            .max_tokens(self.max_tokens)
            .temperature(self.temperature);

        match client.chat(&request).await {
            Ok(text) if text.trim().is_empty() => {
                tracing::warn!("prompt expansion came back empty; using the original prompt");
                Ok(prompt.to_owned())
            }
            Ok(text) => Ok(text.trim().to_owned()),
            Err(e) => {
                tracing::error!(adapter = "image", stage = "expansion", error = %e, "prompt expansion failed");
                Err(ProviderPayload::error(format!("Image prompt expansion failed: {e}")))
            }
        }
    }

    async fn render(&self, expanded: &str) -> Result<String, ProviderPayload> {
        let client = self.renderer.get()?;
        client.generate(expanded).await.map_err(|e| {
            tracing::error!(adapter = "image", stage = "synthesis", error = %e, "image synthesis failed");
            ProviderPayload::error(format!("Failed to generate image: {e}"))
        })
    }
}

#[async_trait]
impl ProviderAdapter for ImageAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Image
    }

    async fn generate(&self, prompt: &str) -> ProviderPayload {
        let expanded = match self.expand(prompt).await {
            Ok(text) => text,
            Err(payload) => return payload,
        };
        tracing::debug!(chars = expanded.len(), "image prompt expanded");

        match self.render(&expanded).await {
            Ok(image_url) => ProviderPayload::ImageResult { image_url },
            Err(payload) => payload,
        }
    }
}
