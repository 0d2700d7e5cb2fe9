//! HTTP backend abstraction for the chat completions endpoint.
//!
//! The client talks to a `CompletionBackend` so tests can swap in canned
//! responses. The production backend is a thin reqwest wrapper with no
//! retry.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::config::AiClientConfig;
use crate::error::{AiError, AiResult};
use crate::models::{ChatRequest, ChatResponse};

// ============================================================================
// Backend Trait
// ============================================================================

/// Sends one chat completion request.
///
/// This is an implementation detail; external code uses `RecipeAiPort`.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> AiResult<ChatResponse>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
}

/// `<base>/chat/completions`, tolerating a trailing slash on the base.
fn completions_url(base_url: &str) -> AiResult<Url> {
    let base = base_url.trim().trim_end_matches('/');
    Ok(Url::parse(&format!("{base}/chat/completions"))?)
}

impl ReqwestBackend {
    /// Create a backend from the client configuration.
    pub fn new(config: &AiClientConfig) -> AiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            endpoint: completions_url(&config.base_url)?,
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl CompletionBackend for ReqwestBackend {
    async fn complete(&self, request: &ChatRequest) -> AiResult<ChatResponse> {
        let mut builder = self.client.post(self.endpoint.as_str()).json(request);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), model = %request.model, "Chat completion returned");

        if !status.is_success() {
            return Err(AiError::ApiRequestFailed {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
