//! Remote chat-completion client.
//!
//! Issues exactly one request per classification: no retries, no timeout
//! override beyond the transport default. The missing-key check runs
//! before any network I/O.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::Value;

use crate::config::{API_KEY_ENV, ModerationConfig};
use crate::error::{ModerationError, Result};
use crate::parse::parse_verdict;
use crate::prompt::build_messages;
use crate::protocol::{ChatCompletionRequest, ChatMessage, ResponseFormat};
use crate::traits::ModerationCapability;
use crate::types::{ModerationRequest, ModerationVerdict};

/// Output-length cap for the completion.
const MAX_COMPLETION_TOKENS: u32 = 300;

/// Client for an OpenAI-compatible chat-completion endpoint.
pub struct ModerationClient {
    http: reqwest::Client,
    config: ModerationConfig,
}

impl ModerationClient {
    /// Create a client with a fresh HTTP connection pool.
    pub fn new(config: ModerationConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Create a client reusing an existing `reqwest` client.
    pub fn with_http_client(config: ModerationConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    /// Perform the single completion call and return the raw reply text.
    ///
    /// A missing `choices[0].message.content` in an otherwise valid
    /// envelope yields an empty reply (which then degrades to the
    /// fail-open verdict) rather than an error.
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            ModerationError::MissingApiKey(format!("{API_KEY_ENV} 未配置。请设置环境变量或在 .env 中提供。"))
        })?;

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let body = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            temperature: 0.0,
            response_format: ResponseFormat::json_object(),
            max_tokens: MAX_COMPLETION_TOKENS,
        };

        tracing::debug!(model = %self.config.model, %url, "dispatching moderation completion");

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ModerationError::ApiError {
                code: status.as_u16(),
                message: detail,
            });
        }

        let text = response.text().await?;
        let envelope: Value = serde_json::from_str(&text)?;
        let content = envelope
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .unwrap_or_default();

        Ok(content.to_string())
    }
}

#[async_trait]
impl ModerationCapability for ModerationClient {
    async fn check(&self, request: &ModerationRequest) -> Result<ModerationVerdict> {
        let content = self.complete(build_messages(request)).await?;
        Ok(parse_verdict(&content))
    }
}
