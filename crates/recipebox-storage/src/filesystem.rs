//! Local filesystem asset store.

use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};
use uuid::Uuid;

use recipebox_core::{AssetError, AssetRef, AssetStore, InlineImage};

/// Asset store that keeps each asset as a file below `root`.
pub struct FilesystemAssetStore {
    root: PathBuf,
    public_base_url: String,
}

impl FilesystemAssetStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    ///
    /// `public_base_url` is the URL the root directory is served from,
    /// e.g. `http://localhost:8080/assets`.
    pub async fn new(
        root: impl AsRef<Path>,
        public_base_url: impl Into<String>,
    ) -> Result<Self, AssetError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| unavailable("create asset root", &e))?;

        Ok(Self {
            root,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the full path for a key, with path traversal protection.
    async fn key_path(&self, key: &str) -> Result<PathBuf, AssetError> {
        let root = self.root.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || key_path_sync(&root, &key))
            .await
            .map_err(|e| AssetError::Unavailable(format!("spawn_blocking failed: {e}")))?
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url)
    }
}

fn unavailable(action: &str, e: &io::Error) -> AssetError {
    AssetError::Unavailable(format!("{action}: {e}"))
}

fn not_found_or_unavailable(key: &str, action: &str, e: &io::Error) -> AssetError {
    if e.kind() == io::ErrorKind::NotFound {
        AssetError::NotFound(key.to_string())
    } else {
        unavailable(action, e)
    }
}

/// Resolve `key` below `root`, rejecting anything that could escape it.
fn key_path_sync(root: &Path, key: &str) -> Result<PathBuf, AssetError> {
    if key.is_empty() || key.contains("..") || key.starts_with('/') || key.starts_with('\\') {
        return Err(AssetError::InvalidPath(key.to_string()));
    }

    if !Path::new(key)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return Err(AssetError::InvalidPath(key.to_string()));
    }

    let path = root.join(key);
    let root_canonical = root
        .canonicalize()
        .map_err(|e| unavailable("canonicalize asset root", &e))?;

    // The nearest existing ancestor (or the file itself) must resolve inside
    // the root, which also catches symlinked directories.
    let mut probe = Some(path.as_path());
    while let Some(candidate) = probe {
        match std::fs::symlink_metadata(candidate) {
            Ok(_) => {
                let resolved = candidate
                    .canonicalize()
                    .map_err(|_| AssetError::InvalidPath(key.to_string()))?;
                if !resolved.starts_with(&root_canonical) {
                    return Err(AssetError::InvalidPath(key.to_string()));
                }
                break;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => probe = candidate.parent(),
            Err(e) => return Err(unavailable("stat asset path", &e)),
        }
    }

    Ok(path)
}

#[async_trait]
impl AssetStore for FilesystemAssetStore {
    #[instrument(skip(self, image), fields(backend = "filesystem", size = image.bytes().len()))]
    async fn upload(&self, path: &str, image: &InlineImage) -> Result<AssetRef, AssetError> {
        let target = self.key_path(path).await?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| unavailable("create asset directory", &e))?;
        }

        let file_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| AssetError::InvalidPath(path.to_string()))?;
        let temp_path = target.with_file_name(format!("{file_name}.tmp.{}", Uuid::new_v4()));

        {
            let mut file = fs::File::create(&temp_path)
                .await
                .map_err(|e| unavailable("create temp file", &e))?;
            file.write_all(image.bytes())
                .await
                .map_err(|e| unavailable("write asset", &e))?;
            file.sync_all()
                .await
                .map_err(|e| unavailable("sync asset", &e))?;
        }

        if let Err(e) = fs::rename(&temp_path, &target).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(unavailable("rename asset", &e));
        }

        debug!(path, "Stored asset");
        Ok(AssetRef::new(path))
    }

    #[instrument(skip(self), fields(backend = "filesystem"))]
    async fn resolve_url(&self, asset: &AssetRef) -> Result<String, AssetError> {
        let target = self.key_path(&asset.path).await?;
        let exists = fs::try_exists(&target)
            .await
            .map_err(|e| unavailable("stat asset", &e))?;
        if !exists {
            return Err(AssetError::NotFound(asset.path.clone()));
        }
        Ok(self.public_url(&asset.path))
    }

    #[instrument(skip(self), fields(backend = "filesystem"))]
    async fn delete(&self, path: &str) -> Result<(), AssetError> {
        let target = self.key_path(path).await?;
        fs::remove_file(&target)
            .await
            .map_err(|e| not_found_or_unavailable(path, "delete asset", &e))?;
        debug!(path, "Deleted asset");
        Ok(())
    }
}
