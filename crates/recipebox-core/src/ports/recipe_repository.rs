//! Recipe repository trait definition.
//!
//! This port defines the interface for recipe document persistence.
//! Implementations must handle all storage details internally.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewRecipe, Recipe, RecipePatch};

/// Document store for recipes.
///
/// # Design Rules
///
/// - No `sqlx` types in signatures
/// - CRUD-only: insert, get, list, update, delete
/// - Ownership checks and image cleanup belong in `RecipeService`, not here
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Insert a new recipe.
    ///
    /// The store assigns the identifier and the creation timestamp.
    /// Returns the new identifier.
    async fn insert(&self, recipe: &NewRecipe) -> Result<String, RepositoryError>;

    /// Get a recipe by its identifier.
    ///
    /// Returns `Ok(None)` if no recipe has that identifier.
    async fn get(&self, id: &str) -> Result<Option<Recipe>, RepositoryError>;

    /// List every recipe, newest first.
    async fn list_ordered(&self) -> Result<Vec<Recipe>, RepositoryError>;

    /// Apply a partial update to an existing recipe.
    ///
    /// Never touches `id`, `owner_id` or `created_at`. Returns
    /// `Err(RepositoryError::NotFound)` if the recipe doesn't exist.
    async fn update(&self, id: &str, patch: &RecipePatch) -> Result<(), RepositoryError>;

    /// Delete a recipe.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the recipe doesn't exist.
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;

    /// Whether the store holds at least one recipe.
    async fn exists_any(&self) -> Result<bool, RepositoryError>;
}
