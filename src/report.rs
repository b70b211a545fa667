//! Report payload normalization.
//!
//! The report endpoint is the least disciplined part of the backend contract:
//! depending on the generation path it returns a plain JSON object, a
//! JSON-encoded string, and/or a payload wrapped in ```json fences, sometimes
//! inside a `{"report": ...}` envelope. Every shape is normalized here; a
//! payload that survives none of the decodings degrades to a synthetic
//! report instead of blocking the report phase.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    #[serde(alias = "score", default)]
    pub overall_score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default = "default_recommendation")]
    pub recommendation: String,
}

fn default_recommendation() -> String {
    "Pending".into()
}

/// Normalize a raw report payload into a [`Report`], never failing.
pub fn parse_report(raw: &str) -> Report {
    match try_parse(raw) {
        Some(report) => report,
        None => {
            tracing::warn!("report payload did not parse; substituting fallback");
            fallback_report(raw)
        }
    }
}

/// Synthetic report used when the payload cannot be parsed.
pub fn fallback_report(raw: &str) -> Report {
    Report {
        overall_score: 0.0,
        strengths: vec!["Unable to parse report".into()],
        weaknesses: Vec::new(),
        summary: raw.to_string(),
        recommendation: "Please review manually".into(),
    }
}

fn try_parse(raw: &str) -> Option<Report> {
    let value: Value = serde_json::from_str(strip_fences(raw).as_ref()).ok()?;
    decode_value(value, 0)
}

/// Peel envelopes and string-encodings until an object emerges.
/// Depth-bounded so a pathological `"\"\\\"...\\\"\""` payload terminates.
fn decode_value(value: Value, depth: u8) -> Option<Report> {
    if depth > 4 {
        return None;
    }
    match value {
        Value::Object(mut map) => {
            if let Some(inner) = map.remove("report") {
                return decode_value(inner, depth + 1);
            }
            serde_json::from_value(Value::Object(map)).ok()
        }
        Value::String(s) => {
            let cleaned = strip_fences(&s);
            let inner: Value = serde_json::from_str(cleaned.as_ref()).ok()?;
            decode_value(inner, depth + 1)
        }
        _ => None,
    }
}

/// Strip ```json / ``` fence markers the generation model sometimes leaves in.
fn strip_fences(text: &str) -> std::borrow::Cow<'_, str> {
    if text.contains("```") {
        std::borrow::Cow::Owned(
            text.replace("```json", "")
                .replace("```", "")
                .trim()
                .to_string(),
        )
    } else {
        std::borrow::Cow::Borrowed(text.trim())
    }
}
