//! Tolerant parsing of model replies.
//!
//! The model is instructed to answer with a single JSON object, but the
//! reply format is not contractually guaranteed: replies may carry leading
//! commentary, markdown fences, or no JSON at all. Extraction is a greedy
//! match from the first `{` to a `}` at the end of the content; when that
//! fails, the whole content is the candidate. Anything unparseable degrades
//! to the fail-open verdict instead of an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::types::{MAX_MATCHED_TERMS, ModerationVerdict};

static JSON_OBJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}$").expect("static pattern"));

/// Parse a raw model reply into a verdict. Never fails.
pub fn parse_verdict(content: &str) -> ModerationVerdict {
    let candidate = JSON_OBJECT_RE
        .find(content)
        .map(|m| m.as_str())
        .unwrap_or(content);

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => coerce_verdict(&value),
        Err(err) => {
            tracing::warn!(error = %err, "model reply is not valid JSON, degrading to safe default");
            ModerationVerdict::safe_default()
        }
    }
}

/// Field-wise coercion of a parsed reply. Extra fields are ignored; absent
/// or wrong-typed fields take their empty value.
fn coerce_verdict(value: &Value) -> ModerationVerdict {
    ModerationVerdict {
        has_violation: coerce_bool(value.get("hasViolation")),
        matched_terms: coerce_terms(value.get("matchedTerms")),
        reasoning: value
            .get("reasoning")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}

// Lenient on representation, strict on meaning: only JSON true, the
// literal string "true", and non-zero numbers flag content.
fn coerce_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

// Non-string elements are dropped; duplicates are removed preserving first
// occurrence; the result is capped at MAX_MATCHED_TERMS.
fn coerce_terms(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    let mut terms: Vec<String> = Vec::new();
    for item in items {
        let Some(term) = item.as_str() else { continue };
        if terms.iter().any(|t| t == term) {
            continue;
        }
        terms.push(term.to_string());
        if terms.len() == MAX_MATCHED_TERMS {
            break;
        }
    }
    terms
}
