//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx`, `reqwest` or filesystem types in any signature
//! - Traits are minimal and CRUD-focused for repositories
//! - Ownership checks and image lifecycle belong in `RecipeService`, not here

pub mod asset_store;
pub mod recipe_ai;
pub mod recipe_feed;
pub mod recipe_repository;

use thiserror::Error;

use crate::domain::{DraftError, InlineImageError, UnknownCuisine};

// Re-export port traits for convenience
pub use asset_store::{AssetRef, AssetStore};
pub use recipe_ai::{GeneratedRecipe, RecipeAiPort, SubstitutionRequest};
pub use recipe_feed::{FeedSubscription, RecipeFeed, SnapshotListener};
pub use recipe_repository::RecipeRepository;

/// Domain-specific errors for document store operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested document was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend is unreachable, unconfigured, or failed the request.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A stored document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors from asset store operations.
///
/// `NotFound` is the only recoverable class: cleanup code treats a missing
/// asset as already deleted.
#[derive(Debug, Error)]
pub enum AssetError {
    /// No asset exists at the given path.
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The path is not a valid asset key.
    #[error("Invalid asset path: {0}")]
    InvalidPath(String),

    /// The backend is unreachable, unconfigured, or failed the request.
    #[error("Asset store unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the AI completion backend.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No backend credentials or endpoint were configured.
    #[error("AI backend not configured: {0}")]
    NotConfigured(String),

    /// The backend rejected or failed the request.
    #[error("AI backend error: {0}")]
    Backend(String),

    /// The backend answered with output that does not match the expected schema.
    #[error("Invalid AI response: {0}")]
    InvalidResponse(String),
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type surfaced by services. Adapters map it to
/// their own presentation (HTTP status codes, toast notifications, etc.).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed or missing required input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The recipe (or asset) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The requester is not allowed to perform the operation.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A backing store is unreachable or unconfigured.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The AI backend failed to produce a result.
    #[error("{0}")]
    GenerationFailure(String),
}

impl From<RepositoryError> for CoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => Self::NotFound(what),
            other => Self::StorageUnavailable(other.to_string()),
        }
    }
}

impl From<AssetError> for CoreError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::NotFound(path) => Self::NotFound(format!("asset {path}")),
            AssetError::InvalidPath(path) => Self::Validation(format!("invalid asset path {path}")),
            AssetError::Unavailable(_) => Self::StorageUnavailable(err.to_string()),
        }
    }
}

impl From<GenerationError> for CoreError {
    fn from(err: GenerationError) -> Self {
        Self::GenerationFailure(err.to_string())
    }
}

impl From<DraftError> for CoreError {
    fn from(err: DraftError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<InlineImageError> for CoreError {
    fn from(err: InlineImageError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<UnknownCuisine> for CoreError {
    fn from(err: UnknownCuisine) -> Self {
        Self::Validation(err.to_string())
    }
}
