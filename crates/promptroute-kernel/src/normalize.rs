//! Response normalization.
//!
//! Flattens any [`ProviderPayload`] into one canonical text answer.  The
//! mapping is total and never fails: shapes without a dedicated rendering
//! fall through to a pretty-printed JSON dump.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::payload::ProviderPayload;

/// Fixed lead-in for image answers.
pub const IMAGE_ANSWER_PREFIX: &str = "I've created an image based on your prompt.";

/// The only externally visible result of a routed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedResult {
    /// The user-facing answer.
    pub text: String,
    /// Label of the provider that produced the answer.
    pub model_label: String,
}

/// Normalize a payload, attaching the label chosen by the dispatch policy.
pub fn normalize(payload: &ProviderPayload, model_label: &str) -> NormalizedResult {
    NormalizedResult {
        text: render_text(payload),
        model_label: model_label.to_owned(),
    }
}

/// Render the canonical text for a payload.
pub fn render_text(payload: &ProviderPayload) -> String {
    match payload {
        ProviderPayload::TaskAndAnswer { response, .. } => response.clone(),
        ProviderPayload::PlainOutput { output } => output.clone(),
        ProviderPayload::PlainResponse { response } => response.clone(),
        ProviderPayload::CodeAnswer {
            intro,
            code,
            conclusion,
        } => format!("{intro}\n\n```\n{code}\n```\n\n{conclusion}"),
        ProviderPayload::ImageResult { image_url } => {
            format!("{IMAGE_ANSWER_PREFIX}\n\nImage URL: {image_url}")
        }
        ProviderPayload::ReasoningResult {
            explanation,
            steps,
            final_answer,
            ..
        } => format!("{explanation}\n\n{steps}\n\nFinal Answer: {final_answer}"),
        ProviderPayload::ProviderError { message, raw } => {
            let mut body = json!({ "error": message });
            if let Some(raw) = raw {
                body["raw"] = json!(raw);
            }
            dump(&body)
        }
        ProviderPayload::Untyped(value) => match ProviderPayload::from_value(value.clone()) {
            ProviderPayload::Untyped(value) => dump(&value),
            typed => render_text(&typed),
        },
    }
}

/// Last-resort rendering: strings verbatim, everything else pretty JSON.
fn dump(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_comes_from_caller() {
        let r = normalize(
            &ProviderPayload::PlainOutput {
                output: "hi".into(),
            },
            "chatgpt",
        );
        assert_eq!(r.text, "hi");
        assert_eq!(r.model_label, "chatgpt");
    }

    #[test]
    fn task_and_answer_returns_response() {
        let p = ProviderPayload::TaskAndAnswer {
            task: "sum".into(),
            response: "4".into(),
        };
        assert_eq!(render_text(&p), "4");
    }

    #[test]
    fn untyped_output_and_response_prefers_output() {
        let p = ProviderPayload::Untyped(json!({"output": "from output", "response": "from response"}));
        assert_eq!(render_text(&p), "from output");
    }

    #[test]
    fn untyped_fallback_dumps_every_field() {
        let p = ProviderPayload::Untyped(json!({"alpha": "one", "beta": 2, "gamma": [true]}));
        let text = render_text(&p);
        for needle in ["\"alpha\"", "\"one\"", "\"beta\"", "2", "\"gamma\"", "true"] {
            assert!(text.contains(needle), "missing {needle} in {text}");
        }
        // Pretty-printed, one field per line.
        assert!(text.contains('\n'));
    }

    #[test]
    fn untyped_string_is_verbatim() {
        let p = ProviderPayload::Untyped(json!("plain words"));
        assert_eq!(render_text(&p), "plain words");
    }

    #[test]
    fn code_answer_is_fenced() {
        let p = ProviderPayload::CodeAnswer {
            intro: "Here it is.".into(),
            code: "print('hi')".into(),
            conclusion: "Done.".into(),
        };
        assert_eq!(
            render_text(&p),
            "Here it is.\n\n```\nprint('hi')\n```\n\nDone."
        );
    }

    #[test]
    fn image_sentence_references_url() {
        let p = ProviderPayload::ImageResult {
            image_url: "https://img.example/cat.png".into(),
        };
        assert_eq!(
            render_text(&p),
            "I've created an image based on your prompt.\n\nImage URL: https://img.example/cat.png"
        );
    }

    #[test]
    fn reasoning_composite() {
        let p = ProviderPayload::ReasoningResult {
            explanation: "Speed question.".into(),
            technique: "d = v * t".into(),
            steps: "10 km / 0.5 h".into(),
            final_answer: "20 km/h".into(),
        };
        assert_eq!(
            render_text(&p),
            "Speed question.\n\n10 km / 0.5 h\n\nFinal Answer: 20 km/h"
        );
    }

    #[test]
    fn provider_error_is_diagnostic_dump() {
        let text = render_text(&ProviderPayload::error("upstream 500"));
        let v: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["error"], "upstream 500");
        assert!(v.get("raw").is_none());
    }

    #[test]
    fn provider_error_carries_raw() {
        let text = render_text(&ProviderPayload::error_with_raw("bad json", "{not json"));
        let v: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["raw"], "{not json");
    }
}
