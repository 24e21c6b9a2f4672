//! Client configuration.
//!
//! All values are environment-provided; there are no CLI flags. The API
//! key is optional at construction time so that a misconfigured process
//! still starts and surfaces the configuration error per request, the way
//! the transport shell maps it to a 500.

use secrecy::SecretString;

/// Default chat-completion endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";

/// Default model identifier.
pub const DEFAULT_MODEL_ID: &str = "deepseek-chat";

/// Environment variable holding the required API key.
pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

/// Environment variable overriding the endpoint base URL.
pub const BASE_URL_ENV: &str = "DEEPSEEK_BASE_URL";

/// Environment variable overriding the model identifier.
pub const MODEL_ID_ENV: &str = "DEEPSEEK_MODEL_ID";

/// Configuration for the moderation model client.
///
/// # Example
///
/// ```rust,ignore
/// let config = ModerationConfig::new("sk-...")
///     .with_base_url("https://api.deepseek.com")
///     .with_model("deepseek-chat");
/// ```
#[derive(Debug, Clone)]
pub struct ModerationConfig {
    pub(crate) api_key: Option<SecretString>,
    pub(crate) base_url: String,
    pub(crate) model: String,
}

impl ModerationConfig {
    /// Create a configuration with the given API key and default endpoint.
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key.into())),
            ..Self::default()
        }
    }

    /// Read the configuration from the process environment.
    ///
    /// A missing `DEEPSEEK_API_KEY` is not an error here; it becomes a
    /// [`crate::ModerationError::MissingApiKey`] on first use.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok().map(SecretString::from),
            base_url: std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: std::env::var(MODEL_ID_ENV).unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string()),
        }
    }

    /// Override the endpoint base URL.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the model identifier.
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL_ID.to_string(),
        }
    }
}
