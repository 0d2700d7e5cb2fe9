//! Composition utilities for building recipe services with `SQLite` backends.
//!
//! This module is focused purely on construction and should not contain any
//! domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use recipebox_core::{AssetStore, RecipeService};

use crate::repositories::{SqliteRecipeFeed, SqliteRecipeRepository};

/// The `SQLite` document store: repository plus its live feed.
///
/// Both halves share one change notifier.
#[derive(Clone)]
pub struct RecipeStore {
    pub repository: Arc<SqliteRecipeRepository>,
    pub feed: Arc<SqliteRecipeFeed>,
}

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Create a `SQLite` connection pool.
    ///
    /// # Arguments
    ///
    /// * `db_url` - `SQLite` connection URL (e.g., "sqlite:recipebox.db")
    pub async fn create_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
        let pool = SqlitePool::connect(db_url).await?;
        Ok(pool)
    }

    /// Build the repository and feed from a pool.
    pub fn build_store(pool: SqlitePool) -> RecipeStore {
        let repository = Arc::new(SqliteRecipeRepository::new(pool));
        let feed = Arc::new(SqliteRecipeFeed::new(Arc::clone(&repository)));
        RecipeStore { repository, feed }
    }

    /// Build a complete `RecipeService` with the live feed attached.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use recipebox_db::{CoreFactory, setup_database};
    /// use recipebox_storage::FilesystemAssetStore;
    ///
    /// let pool = setup_database(&db_path).await?;
    /// let assets = Arc::new(FilesystemAssetStore::new(asset_dir, base_url).await?);
    /// let recipes = CoreFactory::build_recipe_service(pool, assets);
    /// ```
    pub fn build_recipe_service(pool: SqlitePool, assets: Arc<dyn AssetStore>) -> RecipeService {
        let store = Self::build_store(pool);
        RecipeService::new(store.repository, assets).with_feed(store.feed)
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema
/// already applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get a clone of the connection pool.
    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Build a store over this database.
    pub fn store(&self) -> RecipeStore {
        CoreFactory::build_store(self.pool())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use recipebox_core::{
        AssetError, AssetRef, Cuisine, InlineImage, RecipeDraft, RecipeRepository,
    };

    struct NoAssets;

    #[async_trait]
    impl AssetStore for NoAssets {
        async fn upload(&self, path: &str, _image: &InlineImage) -> Result<AssetRef, AssetError> {
            Err(AssetError::Unavailable(path.to_string()))
        }

        async fn resolve_url(&self, asset: &AssetRef) -> Result<String, AssetError> {
            Err(AssetError::NotFound(asset.path.clone()))
        }

        async fn delete(&self, path: &str) -> Result<(), AssetError> {
            Err(AssetError::NotFound(path.to_string()))
        }
    }

    #[tokio::test]
    async fn test_build_store() {
        let db = TestDb::new().await.unwrap();
        let store = db.store();
        let _rx = store.repository.notifier().subscribe();
        assert_eq!(store.repository.notifier().subscriber_count(), 1);
        assert!(!store.repository.exists_any().await.unwrap());
    }

    #[tokio::test]
    async fn test_build_recipe_service() {
        let db = TestDb::new().await.unwrap();
        let service = CoreFactory::build_recipe_service(db.pool(), Arc::new(NoAssets));

        let draft = RecipeDraft::new(
            "Tea",
            Cuisine::Other,
            vec!["Water".to_string()],
            vec!["Boil".to_string()],
        );
        let id = service.create(&draft, "u1").await.unwrap();
        assert_eq!(service.list().await.unwrap()[0].id, id);

        let sub = service.subscribe(Arc::new(|_| {})).unwrap();
        sub.cancel();
    }
}
