//! Error types for AI client operations.
//!
//! These are mapped to `GenerationError` at the port boundary; only
//! construction failures reach callers directly.

use thiserror::Error;

/// Result type alias for AI client operations.
pub type AiResult<T> = Result<T, AiError>;

/// Errors raised by the AI client.
#[derive(Debug, Error)]
pub enum AiError {
    /// No API key was configured.
    #[error("AI client has no API key configured")]
    NotConfigured,

    /// API request failed with an HTTP error status.
    #[error("AI API request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from AI API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured base URL is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
