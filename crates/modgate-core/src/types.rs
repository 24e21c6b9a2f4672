//! Moderation domain types.

use serde::{Deserialize, Serialize};

/// Upper bound on `matched_terms` entries in a verdict.
pub const MAX_MATCHED_TERMS: usize = 10;

/// Reasoning text of the fail-open verdict returned when the model reply
/// is not valid JSON.
pub const SAFE_DEFAULT_REASONING: &str = "模型未返回有效 JSON，已安全降级为未命中。";

/// A single classification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationRequest {
    /// Text to classify.
    pub text: String,
    /// Caller-supplied literal banned terms, forwarded to the model as a
    /// hint. Never matched locally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_banned: Option<Vec<String>>,
}

impl ModerationRequest {
    /// Request without custom banned terms.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            custom_banned: None,
        }
    }

    /// Attach custom banned terms.
    pub fn with_custom_banned(mut self, terms: Vec<String>) -> Self {
        self.custom_banned = Some(terms);
        self
    }
}

/// Outcome of one classification request.
///
/// Always fully populated: every pipeline run produces a verdict, either
/// parsed from the model reply or degraded to [`ModerationVerdict::safe_default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationVerdict {
    /// Whether the text contains banned content.
    pub has_violation: bool,
    /// Terms (or variants) the model reports as matched. Deduplicated,
    /// at most [`MAX_MATCHED_TERMS`] entries.
    pub matched_terms: Vec<String>,
    /// Model-supplied justification for the verdict.
    pub reasoning: String,
}

impl ModerationVerdict {
    /// The fail-open verdict: no violation, with a fixed notice explaining
    /// that the model reply could not be parsed.
    pub fn safe_default() -> Self {
        Self {
            has_violation: false,
            matched_terms: Vec::new(),
            reasoning: SAFE_DEFAULT_REASONING.to_string(),
        }
    }
}
