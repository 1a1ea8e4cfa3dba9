//! Decoding helpers for model replies that are supposed to be JSON.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

static FENCE: OnceLock<Regex> = OnceLock::new();

/// Remove a leading ```` ```json ```` and trailing ```` ``` ```` marker on any
/// line, then trim.
pub fn strip_json_fences(text: &str) -> String {
    let fence =
        FENCE.get_or_init(|| Regex::new(r"(?m)^```json|```$").expect("fence pattern is valid"));
    fence.replace_all(text.trim(), "").trim().to_owned()
}

/// Parse `text` as JSON after stripping code fences.
pub fn parse_fenced_json(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(&strip_json_fences(text))
}
