//! Logical reasoning adapter.
//!
//! The backend is asked for a fixed four-field JSON object.  Replies are
//! tolerated with or without a ```` ```json ```` fence; anything that still
//! fails to parse comes back as a [`ProviderPayload::ProviderError`] carrying
//! the raw text.

use async_trait::async_trait;
use promptroute_agent::{ChatRequest, LlmClient};
use promptroute_kernel::{ProviderAdapter, ProviderKind, ProviderPayload};
use serde::Deserialize;
use serde_json::Value;

use crate::backend::Backend;
use crate::config::ProviderSettings;
use crate::decode::parse_fenced_json;

const SYSTEM_PROMPT: &str = r#"You are an AI specialized in logical reasoning, critical thinking, and problem-solving.
Carefully analyze the given prompt and provide a structured response in this format:

{
    "Explanation": "Briefly explain what the question is asking",
    "Formula or Technique": "Mention the formula, rule, or logical principle used",
    "Completion Steps": "Detailed step-by-step process to reach the answer",
    "Final Answer": "The correct logical conclusion"
}

Respond ONLY with raw JSON. Do NOT use code blocks or markdown."#;

/// Error message for replies that do not decode.
pub const INVALID_JSON_MESSAGE: &str = "reasoning backend returned invalid JSON";

/// The schema the backend is asked to fill.
#[derive(Debug, Deserialize)]
struct ReasoningReply {
    #[serde(rename = "Explanation", default)]
    explanation: String,
    #[serde(rename = "Formula or Technique", default)]
    technique: String,
    #[serde(rename = "Completion Steps", default)]
    steps: Steps,
    #[serde(rename = "Final Answer")]
    final_answer: Value,
}

/// `Completion Steps` arrives either as one string or a list of steps.
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum Steps {
    Text(String),
    List(Vec<Value>),
    #[default]
    Missing,
}

impl Steps {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::List(items) => items
                .iter()
                .map(scalar_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Missing => String::new(),
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decode a reasoning reply into a payload.
pub fn decode_reply(reply: &str) -> ProviderPayload {
    let parsed = parse_fenced_json(reply)
        .and_then(serde_json::from_value::<ReasoningReply>);

    match parsed {
        Ok(r) => ProviderPayload::ReasoningResult {
            explanation: r.explanation,
            technique: r.technique,
            steps: r.steps.into_text(),
            final_answer: scalar_text(&r.final_answer),
        },
        Err(e) => {
            tracing::error!(adapter = "reasoning", error = %e, "failed to decode reasoning reply");
            ProviderPayload::error_with_raw(INVALID_JSON_MESSAGE, reply)
        }
    }
}

pub struct ReasoningAdapter {
    client: Backend<LlmClient>,
    max_tokens: u32,
    temperature: f32,
}

impl ReasoningAdapter {
    pub fn new(settings: &ProviderSettings) -> Self {
        Self {
            client: Backend::connect("gemini", LlmClient::new(settings.openai_client())),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }
}

#[async_trait]
impl ProviderAdapter for ReasoningAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Reasoning
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
            Ok(reply) => decode_reply(&reply),
            Err(e) => {
                tracing::error!(adapter = "reasoning", error = %e, "reasoning backend call failed");
                ProviderPayload::error(format!("Unexpected error: {e}"))
            }
        }
    }
}
