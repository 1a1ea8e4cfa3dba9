//! Friendly chat adapter backed by the OpenAI Chat Completions API.
//!
//! Prompts that mention image keywords are handed to the image adapter
//! before any chat call is made.

use std::sync::Arc;

use async_trait::async_trait;
use promptroute_agent::{ChatRequest, LlmClient};
use promptroute_kernel::classifier::IMAGE_KEYWORDS;
use promptroute_kernel::{ProviderAdapter, ProviderKind, ProviderPayload};
use serde_json::Value;

use crate::backend::Backend;
use crate::config::ProviderSettings;

const SYSTEM_PROMPT: &str = "\
You are an AI assistant who responds like a friendly companion. Your goal is \
to keep the conversation engaging and natural.
- If the user is looking for an answer to a task, provide a structured and complete response.
- If the user wants to chat, respond in a warm, interactive way, extending the conversation when possible.
- Maintain a smooth, natural flow; never let the interaction feel dry.
- Adapt to the user's tone and mood.

Respond in one of these formats:
- If there's a task to complete, strictly as raw JSON:
  {\"task\": \"short description of the task\", \"response\": \"solution or completion of the task\"}
- If it's a casual interaction, as plain text.";

pub struct ConversationalAdapter {
    client: Backend<LlmClient>,
    image: Arc<dyn ProviderAdapter>,
    max_tokens: u32,
    temperature: f32,
}

impl ConversationalAdapter {
    /// `image` receives prompts that ask for a picture.
    pub fn new(settings: &ProviderSettings, image: Arc<dyn ProviderAdapter>) -> Self {
        Self {
            client: Backend::connect("openai", LlmClient::new(settings.openai_client())),
            image,
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }
}

/// Whether the prompt mentions any image keyword.
pub fn wants_image(prompt: &str) -> bool {
    let lower = prompt.to_lowercase();
    IMAGE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Decode a chat reply.
///
/// JSON replies decode to one of the chat shapes; any other JSON is kept
/// [`ProviderPayload::Untyped`] for the normalizer.  Non-JSON replies are
/// plain output.
pub fn decode_reply(reply: &str) -> ProviderPayload {
    let reply = reply.trim();
    let Ok(value) = serde_json::from_str::<Value>(reply) else {
        return ProviderPayload::PlainOutput {
            output: reply.to_owned(),
        };
    };

    match ProviderPayload::from_value(value.clone()) {
        payload @ (ProviderPayload::TaskAndAnswer { .. }
        | ProviderPayload::PlainOutput { .. }
        | ProviderPayload::PlainResponse { .. }) => payload,
        _ => ProviderPayload::Untyped(value),
    }
}

#[async_trait]
impl ProviderAdapter for ConversationalAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Conversational
    }

    async fn generate(&self, prompt: &str) -> ProviderPayload {
        if wants_image(prompt) {
            tracing::debug!("conversational prompt delegated to image adapter");
            return self.image.generate(prompt).await;
        }

        let client = match self.client.get() {
            Ok(client) => client,
            Err(payload) => return payload,
        };

        let request = ChatRequest::with_system(SYSTEM_PROMPT, prompt)
            .max_tokens(self.max_tokens)
            .temperature(self.temperature);

        match client.chat(&request).await {
            Ok(reply) => decode_reply(&reply),
            Err(e) => {
                tracing::error!(adapter = "conversational", error = %e, "chat backend call failed");
                ProviderPayload::error(format!("An error occurred: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_keywords_trigger_delegation() {
        assert!(wants_image("Please GENERATE a sunset"));
        assert!(wants_image("an image of a cat"));
        assert!(!wants_image("how are you"));
    }

    #[test]
    fn json_task_reply() {
        let p = decode_reply(r#"{"task": "greet", "response": "hello!"}"#);
        assert_eq!(
            p,
            ProviderPayload::TaskAndAnswer {
                task: "greet".into(),
                response: "hello!".into()
            }
        );
    }

    #[test]
    fn plain_text_reply() {
        let p = decode_reply("  Doing great, thanks!  ");
        assert_eq!(
            p,
            ProviderPayload::PlainOutput {
                output: "Doing great, thanks!".into()
            }
        );
    }

    #[test]
    fn code_key_bag_is_left_to_the_normalizer() {
        let p = decode_reply(r#"{"code": "print(1)"}"#);
        assert!(!p.is_code_answer());
        assert!(matches!(p, ProviderPayload::Untyped(_)));
    }

    #[test]
    fn json_string_reply_stays_untyped() {
        let p = decode_reply("\"just a string\"");
        assert_eq!(p, ProviderPayload::Untyped(Value::String("just a string".into())));
    }
}
