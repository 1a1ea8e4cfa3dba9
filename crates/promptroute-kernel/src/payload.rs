//! Provider payload variants.
//!
//! Backends answer in different shapes.  [`ProviderPayload`] names each
//! shape explicitly so the normalizer can be a total `match`.  Replies that
//! arrive as loose JSON are decoded with [`ProviderPayload::from_value`],
//! which probes keys in a fixed precedence order and keeps anything it does
//! not recognize as [`ProviderPayload::Untyped`].

use serde_json::{Map, Value};

/// The shape-specific result of one provider call.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderPayload {
    /// A task description plus its completion.
    TaskAndAnswer { task: String, response: String },

    /// Free-form text produced by a chat model.
    PlainOutput { output: String },

    /// A bare response field.
    PlainResponse { response: String },

    /// Structured code answer.  No current adapter produces this shape.
    CodeAnswer {
        intro: String,
        code: String,
        conclusion: String,
    },

    /// A generated image.
    ImageResult { image_url: String },

    /// Structured reasoning walk-through.
    ReasoningResult {
        explanation: String,
        technique: String,
        steps: String,
        final_answer: String,
    },

    /// The provider call failed.  `raw` holds unparsed backend text when the
    /// failure was a decoding problem.
    ProviderError {
        message: String,
        raw: Option<String>,
    },

    /// Anything not recognized above.
    Untyped(Value),
}

impl ProviderPayload {
    /// Shorthand for a [`ProviderPayload::ProviderError`] without raw text.
    pub fn error(message: impl Into<String>) -> Self {
        Self::ProviderError {
            message: message.into(),
            raw: None,
        }
    }

    /// Shorthand for a [`ProviderPayload::ProviderError`] carrying the raw
    /// backend text.
    pub fn error_with_raw(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::ProviderError {
            message: message.into(),
            raw: Some(raw.into()),
        }
    }

    /// Whether this is a provider failure.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::ProviderError { .. })
    }

    /// Whether this is the structured code shape.
    pub fn is_code_answer(&self) -> bool {
        matches!(self, Self::CodeAnswer { .. })
    }

    /// Short variant name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TaskAndAnswer { .. } => "task_and_answer",
            Self::PlainOutput { .. } => "plain_output",
            Self::PlainResponse { .. } => "plain_response",
            Self::CodeAnswer { .. } => "code_answer",
            Self::ImageResult { .. } => "image_result",
            Self::ReasoningResult { .. } => "reasoning_result",
            Self::ProviderError { .. } => "provider_error",
            Self::Untyped(_) => "untyped",
        }
    }

    /// Decode a loose JSON key bag into a typed variant.
    ///
    /// Keys are probed in precedence order; the first rule that matches
    /// decides the variant:
    ///
    /// 1. `task` and `response`
    /// 2. `output`
    /// 3. `response`
    /// 4. `code`
    /// 5. `imageUrl`
    /// 6. `finalAnswer`
    ///
    /// Each key is also accepted under its capitalised label (`Output`,
    /// `Image URL`, `Final Answer`, ...).  A key only counts when its value
    /// is a string.  Non-objects and unmatched objects are returned as
    /// [`ProviderPayload::Untyped`].
    pub fn from_value(value: Value) -> Self {
        value
            .as_object()
            .and_then(decode_key_bag)
            .unwrap_or_else(|| Self::Untyped(value))
    }
}

/// Apply the key precedence rules to a JSON object.
fn decode_key_bag(map: &Map<String, Value>) -> Option<ProviderPayload> {
    if let (Some(task), Some(response)) =
        (text(map, &["task", "Task"]), text(map, &["response", "Response"]))
    {
        return Some(ProviderPayload::TaskAndAnswer { task, response });
    }
    if let Some(output) = text(map, &["output", "Output"]) {
        return Some(ProviderPayload::PlainOutput { output });
    }
    if let Some(response) = text(map, &["response", "Response"]) {
        return Some(ProviderPayload::PlainResponse { response });
    }
    if let Some(code) = text(map, &["code", "Code"]) {
        return Some(ProviderPayload::CodeAnswer {
            intro: text(map, &["intro", "Intro"]).unwrap_or_default(),
            code,
            conclusion: text(map, &["conclusion", "Conclusion"]).unwrap_or_default(),
        });
    }
    if let Some(image_url) = text(map, &["imageUrl", "image_url", "Image URL"]) {
        return Some(ProviderPayload::ImageResult { image_url });
    }
    if let Some(final_answer) = text(map, &["finalAnswer", "final_answer", "Final Answer"]) {
        return Some(ProviderPayload::ReasoningResult {
            explanation: text(map, &["explanation", "Explanation"]).unwrap_or_default(),
            technique: text(map, &["technique", "Formula or Technique"]).unwrap_or_default(),
            steps: text(map, &["steps", "Completion Steps"]).unwrap_or_default(),
            final_answer,
        });
    }
    None
}

/// Look up the first present string field among `keys`.
fn text(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| map.get(*k).and_then(Value::as_str))
        .map(str::to_owned)
}
