//! Chat completions client.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::AiClientConfig;
use crate::error::{AiError, AiResult};
use crate::http::{CompletionBackend, ReqwestBackend};
use crate::models::ChatRequest;

/// Default client using the reqwest HTTP backend.
pub type DefaultAiClient = OpenAiCompatClient<ReqwestBackend>;

/// Client for an OpenAI-compatible chat completions API.
///
/// Generic over the HTTP backend for testing; use [`DefaultAiClient`] in
/// production and talk to it through `RecipeAiPort`.
pub struct OpenAiCompatClient<B: CompletionBackend> {
    pub(crate) backend: B,
    pub(crate) model: String,
    configured: bool,
}

impl DefaultAiClient {
    /// Create a client with the given configuration.
    ///
    /// A missing API key is not an error here; every call made by such a
    /// client fails with `NotConfigured` instead.
    pub fn new(config: &AiClientConfig) -> AiResult<Self> {
        let backend = ReqwestBackend::new(config)?;
        Ok(Self::with_backend(config, backend))
    }
}

impl<B: CompletionBackend> OpenAiCompatClient<B> {
    pub(crate) fn with_backend(config: &AiClientConfig, backend: B) -> Self {
        Self {
            backend,
            model: config.model.clone(),
            configured: config.is_configured(),
        }
    }

    /// Send `request` and parse the first choice's content as `T`.
    pub(crate) async fn complete_json<T: DeserializeOwned>(
        &self,
        request: &ChatRequest,
    ) -> AiResult<T> {
        if !self.configured {
            return Err(AiError::NotConfigured);
        }

        let response = self.backend.complete(request).await?;
        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AiError::InvalidResponse {
                message: "response contained no choices".to_string(),
            })?
            .message
            .content
            .ok_or_else(|| AiError::InvalidResponse {
                message: "first choice has no content".to_string(),
            })?;

        debug!(len = content.len(), "Parsing structured completion");
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use crate::models::{ChatMessage, ResponseFormat};
    use serde_json::{Value, json};

    fn configured() -> AiClientConfig {
        AiClientConfig::new().with_model("test-model").with_api_key("k")
    }

    fn request() -> ChatRequest {
        ChatRequest {
            model: "test-model".to_string(),
            messages: vec![ChatMessage::user("hi")],
            response_format: ResponseFormat::json_schema("x", json!({})),
        }
    }

    #[test]
    fn test_default_client_creation() {
        let client = DefaultAiClient::new(&configured()).unwrap();
        assert_eq!(client.model, "test-model");
    }

    #[tokio::test]
    async fn test_parses_first_choice_content() {
        let backend = FakeBackend::new().with_response(CannedResponse::content(r#"{"a": 1}"#));
        let client = OpenAiCompatClient::with_backend(&configured(), backend);

        let value: Value = client.complete_json(&request()).await.unwrap();
        assert_eq!(value["a"], 1);
    }

    #[tokio::test]
    async fn test_unconfigured_client_never_calls_backend() {
        let backend = FakeBackend::new().with_response(CannedResponse::content("{}"));
        let client = OpenAiCompatClient::with_backend(&AiClientConfig::new(), backend);

        let result: AiResult<Value> = client.complete_json(&request()).await;
        assert!(matches!(result, Err(AiError::NotConfigured)));
        assert!(client.backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_empty_or_malformed_responses_are_errors() {
        let backend = FakeBackend::new()
            .with_response(CannedResponse::Json(json!({"choices": []})))
            .with_response(CannedResponse::Json(
                json!({"choices": [{"message": {"content": null}}]}),
            ))
            .with_response(CannedResponse::content("not json"));
        let client = OpenAiCompatClient::with_backend(&configured(), backend);

        let no_choices: AiResult<Value> = client.complete_json(&request()).await;
        assert!(matches!(no_choices, Err(AiError::InvalidResponse { .. })));
        let no_content: AiResult<Value> = client.complete_json(&request()).await;
        assert!(matches!(no_content, Err(AiError::InvalidResponse { .. })));
        let bad_json: AiResult<Value> = client.complete_json(&request()).await;
        assert!(matches!(bad_json, Err(AiError::JsonParse(_))));
    }
}
