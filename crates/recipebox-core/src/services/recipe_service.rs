//! Recipe service - orchestrates recipe CRUD, ownership and image lifecycle.

use std::sync::Arc;

use chrono::Utc;
use futures_util::future::try_join_all;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{
    ImageInput, InlineImage, NewRecipe, Recipe, RecipeDraft, RecipeFilter, RecipePatch,
    SYSTEM_OWNER_ID, StoredImage,
};
use crate::ports::{
    AssetError, AssetStore, CoreError, FeedSubscription, RecipeFeed, RecipeRepository,
    SnapshotListener,
};
use crate::seed::SampleRecipe;
use crate::utils::recipe_image_path;

/// Result of [`RecipeService::seed_if_empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already held recipes; nothing was inserted.
    AlreadyPopulated,
    /// The store was empty and this many samples were inserted.
    Seeded(usize),
}

/// Service for recipe operations.
///
/// Every mutating call takes the requester identifier explicitly. The
/// service enforces ownership and keeps the asset store in step with the
/// image fields of each document. Steps inside one call run in sequence;
/// there is no rollback across the two stores.
pub struct RecipeService {
    repo: Arc<dyn RecipeRepository>,
    assets: Arc<dyn AssetStore>,
    feed: Option<Arc<dyn RecipeFeed>>,
}

impl RecipeService {
    /// Create a new recipe service over a document store and an asset store.
    pub fn new(repo: Arc<dyn RecipeRepository>, assets: Arc<dyn AssetStore>) -> Self {
        Self {
            repo,
            assets,
            feed: None,
        }
    }

    /// Attach a live snapshot feed.
    #[must_use]
    pub fn with_feed(mut self, feed: Arc<dyn RecipeFeed>) -> Self {
        self.feed = Some(feed);
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a recipe by id. Public.
    pub async fn get(&self, id: &str) -> Result<Option<Recipe>, CoreError> {
        self.repo.get(id).await.map_err(CoreError::from)
    }

    /// Get a recipe by id. Returns `NotFound` if it doesn't exist.
    pub async fn find(&self, id: &str) -> Result<Recipe, CoreError> {
        self.get(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("recipe {id}")))
    }

    /// List every recipe, newest first. Public.
    pub async fn list(&self) -> Result<Vec<Recipe>, CoreError> {
        self.repo.list_ordered().await.map_err(CoreError::from)
    }

    /// Recipes created by one user, newest first.
    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Recipe>, CoreError> {
        let mut recipes = self.list().await?;
        recipes.retain(|r| r.is_owned_by(owner_id));
        Ok(recipes)
    }

    /// Catalog search by text and cuisine, newest first.
    pub async fn search(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, CoreError> {
        let mut recipes = self.list().await?;
        recipes.retain(|r| filter.matches(r));
        Ok(recipes)
    }

    /// Receive the ordered list now and after every change.
    ///
    /// Fails with `StorageUnavailable` when no feed is attached.
    pub fn subscribe(&self, listener: SnapshotListener) -> Result<FeedSubscription, CoreError> {
        let feed = self.feed.as_ref().ok_or_else(|| {
            CoreError::StorageUnavailable("live recipe feed is not configured".to_string())
        })?;
        feed.subscribe(listener).map_err(CoreError::from)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a recipe owned by `owner_id`. Returns the new id.
    ///
    /// An inline image is uploaded before the document is written. If the
    /// insert then fails the uploaded asset stays behind.
    pub async fn create(&self, draft: &RecipeDraft, owner_id: &str) -> Result<String, CoreError> {
        check_requester(owner_id)?;
        let content = draft.normalize()?;

        let image = match &draft.image {
            ImageInput::Inline(photo) => self.store_image(owner_id, &content.title, photo).await?,
            ImageInput::Hosted(url) if !url.trim().is_empty() => StoredImage::hosted(url.trim()),
            ImageInput::Hosted(_) | ImageInput::None => StoredImage::default(),
        };

        let new_recipe = NewRecipe {
            content,
            image,
            owner_id: owner_id.to_string(),
        };

        match self.repo.insert(&new_recipe).await {
            Ok(id) => {
                debug!(recipe_id = %id, owner_id, "Created recipe");
                Ok(id)
            }
            Err(e) => {
                if let Some(path) = &new_recipe.image.storage_path {
                    warn!(path = %path, error = %e, "Recipe insert failed, uploaded image left in asset store");
                }
                Err(e.into())
            }
        }
    }

    /// Replace the editable fields of a recipe.
    ///
    /// Image fields change only when the draft carries an inline image: the
    /// previous managed asset is deleted first, then the new one uploaded.
    pub async fn update(
        &self,
        id: &str,
        draft: &RecipeDraft,
        requester_id: &str,
    ) -> Result<(), CoreError> {
        let recipe = self.find(id).await?;
        authorize(&recipe, requester_id)?;
        let content = draft.normalize()?;

        let image = match &draft.image {
            ImageInput::Inline(photo) => {
                if let Some(old_path) = &recipe.image_storage_path {
                    self.discard_asset(old_path).await?;
                }
                Some(self.store_image(&recipe.owner_id, &content.title, photo).await?)
            }
            ImageInput::Hosted(_) | ImageInput::None => None,
        };

        self.repo
            .update(id, &RecipePatch { content, image })
            .await?;
        debug!(recipe_id = %id, "Updated recipe");
        Ok(())
    }

    /// Delete a recipe and its managed image.
    pub async fn delete(&self, id: &str, requester_id: &str) -> Result<(), CoreError> {
        let recipe = self.find(id).await?;
        authorize(&recipe, requester_id)?;

        if let Some(path) = &recipe.image_storage_path {
            self.discard_asset(path).await?;
        }

        self.repo.delete(id).await?;
        debug!(recipe_id = %id, "Deleted recipe");
        Ok(())
    }

    /// Insert `samples` if, and only if, the store is empty.
    pub async fn seed_if_empty(&self, samples: &[SampleRecipe]) -> Result<SeedOutcome, CoreError> {
        if self.repo.exists_any().await? {
            debug!("Recipe store already populated, skipping seed");
            return Ok(SeedOutcome::AlreadyPopulated);
        }

        let inserts = samples.iter().map(|sample| {
            let new_recipe = sample.to_new_recipe();
            async move { self.repo.insert(&new_recipe).await }
        });
        let ids = try_join_all(inserts).await?;

        info!(count = ids.len(), "Seeded sample recipes");
        Ok(SeedOutcome::Seeded(ids.len()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Image helpers
    // ─────────────────────────────────────────────────────────────────────────

    async fn store_image(
        &self,
        owner_id: &str,
        title: &str,
        photo: &InlineImage,
    ) -> Result<StoredImage, CoreError> {
        let path = recipe_image_path(owner_id, title, photo, Utc::now(), Uuid::new_v4());
        let asset = self.assets.upload(&path, photo).await?;
        let url = self.assets.resolve_url(&asset).await?;
        debug!(path = %asset.path, "Uploaded recipe image");
        Ok(StoredImage::managed(url, asset.path))
    }

    /// Delete a managed asset; an already-missing asset is not an error.
    async fn discard_asset(&self, path: &str) -> Result<(), CoreError> {
        match self.assets.delete(path).await {
            Ok(()) => {
                debug!(path, "Deleted recipe image");
                Ok(())
            }
            Err(AssetError::NotFound(_)) => {
                warn!(path, "Recipe image already missing from asset store");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn check_requester(requester_id: &str) -> Result<(), CoreError> {
    if requester_id.trim().is_empty() {
        return Err(CoreError::Unauthorized(
            "a signed-in user is required".to_string(),
        ));
    }
    if requester_id == SYSTEM_OWNER_ID {
        return Err(CoreError::Unauthorized(
            "sample recipes are read-only".to_string(),
        ));
    }
    Ok(())
}

fn authorize(recipe: &Recipe, requester_id: &str) -> Result<(), CoreError> {
    check_requester(requester_id)?;
    if !recipe.is_owned_by(requester_id) {
        return Err(CoreError::Unauthorized(format!(
            "recipe {} belongs to another user",
            recipe.id
        )));
    }
    Ok(())
}
