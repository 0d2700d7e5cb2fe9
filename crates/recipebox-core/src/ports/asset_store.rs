//! Asset store trait definition.
//!
//! Recipe images uploaded by users are kept in a binary object store,
//! addressed by a slash-separated path such as
//! `recipes/<owner>/<millis>_<token>_<title>.png`.

use async_trait::async_trait;

use super::AssetError;
use crate::domain::InlineImage;

/// Handle to an uploaded asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetRef {
    /// Store-relative path of the asset.
    pub path: String,
}

impl AssetRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Binary object store for recipe images.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Upload `image` at `path`, replacing anything already stored there.
    async fn upload(&self, path: &str, image: &InlineImage) -> Result<AssetRef, AssetError>;

    /// Resolve a public URL for a stored asset.
    ///
    /// Returns `Err(AssetError::NotFound)` if nothing is stored at the path.
    async fn resolve_url(&self, asset: &AssetRef) -> Result<String, AssetError>;

    /// Delete the asset at `path`.
    ///
    /// Returns `Err(AssetError::NotFound)` if nothing is stored there.
    async fn delete(&self, path: &str) -> Result<(), AssetError>;
}
