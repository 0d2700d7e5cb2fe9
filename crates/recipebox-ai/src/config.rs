//! Public configuration for the AI client.
//!
//! The backend is any server speaking the OpenAI chat completions API,
//! so the base URL and model name are both configurable.

use std::time::Duration;

/// Default endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model; it must accept image input for photo analysis.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for the AI client.
///
/// # Example
///
/// ```
/// use recipebox_ai::AiClientConfig;
/// use std::time::Duration;
///
/// let config = AiClientConfig::new()
///     .with_model("gpt-4o")
///     .with_timeout(Duration::from_secs(90));
/// ```
#[derive(Clone)]
pub struct AiClientConfig {
    /// Root URL; `/chat/completions` is appended
    pub(crate) base_url: String,
    /// Model name sent with every request
    pub(crate) model: String,
    /// Bearer token
    pub(crate) api_key: Option<String>,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
}

impl Default for AiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(60),
            user_agent: concat!("recipebox-ai/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl std::fmt::Debug for AiClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiClientConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl AiClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API root, e.g. `http://localhost:11434/v1`.
    ///
    /// Defaults to [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set an optional API key. Blank keys count as missing.
    #[must_use]
    pub fn with_optional_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 60 seconds; image analysis is slow.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Whether calls can be made at all.
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
