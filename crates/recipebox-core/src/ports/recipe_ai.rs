//! AI port for recipe assistance.
//!
//! Two capabilities are exposed: suggesting ingredient substitutes and
//! drafting a recipe from a photo of a dish. Both are single request/response
//! calls with no retry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::GenerationError;
use crate::domain::InlineImage;

/// Input for an ingredient substitution request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstitutionRequest {
    /// Name of the recipe the ingredient belongs to.
    pub recipe_name: String,
    /// Ingredient to replace.
    pub ingredient: String,
}

/// Structured recipe returned by the image-to-recipe call.
///
/// The cuisine is kept as free text; the service maps it onto the known
/// cuisine tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedRecipe {
    pub title: String,
    pub cuisine: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

/// Generative model backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeAiPort: Send + Sync {
    /// Suggest replacements for `request.ingredient`.
    async fn suggest_substitutes(
        &self,
        request: &SubstitutionRequest,
    ) -> Result<Vec<String>, GenerationError>;

    /// Identify the dish in `photo` and write a recipe for it.
    async fn recipe_from_image(&self, photo: &InlineImage)
    -> Result<GeneratedRecipe, GenerationError>;
}
