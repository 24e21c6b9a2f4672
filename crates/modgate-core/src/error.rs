//! Error types for the moderation pipeline.
//!
//! A model reply that cannot be parsed is deliberately not represented
//! here: it degrades to the fail-open verdict instead of failing the
//! request (see [`crate::parse`]). Only configuration and transport-level
//! failures surface as errors.

use thiserror::Error;

/// Errors produced while invoking the remote moderation model.
#[derive(Error, Debug)]
pub enum ModerationError {
    /// Required API key was not provided. Raised before any network I/O.
    #[error("{0}")]
    MissingApiKey(String),

    /// The upstream endpoint answered with a non-success status.
    /// `message` carries the remote response body as diagnostic detail.
    #[error("DeepSeek 调用失败: {message}")]
    ApiError { code: u16, message: String },

    /// Network-level failure reaching the upstream endpoint.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The upstream response envelope was not valid JSON.
    #[error("invalid response body: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for moderation operations.
pub type Result<T> = std::result::Result<T, ModerationError>;
