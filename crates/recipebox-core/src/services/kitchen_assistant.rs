//! Kitchen assistant - AI-backed helpers for the recipe form.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::{Cuisine, ImageInput, InlineImage, RecipeDraft};
use crate::ports::{CoreError, RecipeAiPort, SubstitutionRequest};

/// Message surfaced when substitution suggestions fail.
pub const SUBSTITUTION_FAILED: &str = "Failed to get ingredient substitutions.";

/// Message surfaced when image-to-recipe generation fails.
pub const GENERATION_FAILED: &str = "Failed to generate recipe from image.";

/// Service wrapping the AI port.
///
/// Backend failures are logged with their cause and reported to callers as
/// [`CoreError::GenerationFailure`] carrying a short user-facing message.
pub struct KitchenAssistant {
    ai: Arc<dyn RecipeAiPort>,
}

impl KitchenAssistant {
    pub fn new(ai: Arc<dyn RecipeAiPort>) -> Self {
        Self { ai }
    }

    /// Suggest replacements for one ingredient of a recipe.
    ///
    /// An empty list means the model found no good substitute.
    pub async fn suggest_substitutes(
        &self,
        recipe_name: &str,
        ingredient: &str,
    ) -> Result<Vec<String>, CoreError> {
        let recipe_name = recipe_name.trim();
        let ingredient = ingredient.trim();
        if recipe_name.is_empty() {
            return Err(CoreError::Validation("Recipe name is required".to_string()));
        }
        if ingredient.is_empty() {
            return Err(CoreError::Validation("Ingredient is required".to_string()));
        }

        let request = SubstitutionRequest {
            recipe_name: recipe_name.to_string(),
            ingredient: ingredient.to_string(),
        };
        let raw = self.ai.suggest_substitutes(&request).await.map_err(|e| {
            error!(error = %e, ingredient, "Ingredient substitution failed");
            CoreError::GenerationFailure(SUBSTITUTION_FAILED.to_string())
        })?;

        let suggestions = dedupe(raw);
        debug!(ingredient, count = suggestions.len(), "Substitutions suggested");
        Ok(suggestions)
    }

    /// Turn a photo of a dish into a recipe draft.
    ///
    /// The draft carries the photo itself as its inline image, so creating a
    /// recipe from it uploads the photo.
    pub async fn draft_from_photo(&self, photo_data_uri: &str) -> Result<RecipeDraft, CoreError> {
        let photo = InlineImage::from_data_uri(photo_data_uri)?;

        let generated = self.ai.recipe_from_image(&photo).await.map_err(|e| {
            error!(error = %e, "Recipe generation from image failed");
            CoreError::GenerationFailure(GENERATION_FAILED.to_string())
        })?;

        let hint = image_hint(&generated.title);
        let draft = RecipeDraft::new(
            generated.title.trim(),
            Cuisine::parse_lenient(&generated.cuisine),
            generated.ingredients,
            generated.instructions,
        )
        .with_image(ImageInput::Inline(photo))
        .with_image_hint(hint);

        if let Err(e) = draft.normalize() {
            error!(error = %e, "Generated recipe is incomplete");
            return Err(CoreError::GenerationFailure(GENERATION_FAILED.to_string()));
        }

        debug!(title = %draft.title, cuisine = %draft.cuisine, "Drafted recipe from photo");
        Ok(draft)
    }
}

/// Trim, drop blanks and case-insensitive duplicates, keep first-seen order.
fn dedupe(raw: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .collect()
}

/// First two words of the title, lowercased.
fn image_hint(title: &str) -> String {
    title
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{GeneratedRecipe, GenerationError, recipe_ai::MockRecipeAiPort};

    const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    fn assistant(mock: MockRecipeAiPort) -> KitchenAssistant {
        KitchenAssistant::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_suggestions_are_cleaned() {
        let mut mock = MockRecipeAiPort::new();
        mock.expect_suggest_substitutes()
            .withf(|req| req.recipe_name == "Pancakes" && req.ingredient == "Buttermilk")
            .times(1)
            .returning(|_| {
                Ok(vec![
                    " Milk and lemon juice ".to_string(),
                    String::new(),
                    "Yogurt".to_string(),
                    "milk and lemon juice".to_string(),
                ])
            });

        let out = assistant(mock)
            .suggest_substitutes(" Pancakes ", "Buttermilk ")
            .await
            .unwrap();
        assert_eq!(out, vec!["Milk and lemon juice", "Yogurt"]);
    }

    #[tokio::test]
    async fn test_empty_suggestions_are_valid() {
        let mut mock = MockRecipeAiPort::new();
        mock.expect_suggest_substitutes()
            .returning(|_| Ok(vec![]));

        let out = assistant(mock)
            .suggest_substitutes("Tea", "Water")
            .await
            .unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_blank_inputs_never_reach_backend() {
        let mut mock = MockRecipeAiPort::new();
        mock.expect_suggest_substitutes().times(0);
        let assistant = assistant(mock);

        assert!(matches!(
            assistant.suggest_substitutes("", "Salt").await,
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            assistant.suggest_substitutes("Soup", "  ").await,
            Err(CoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_backend_failure_uses_user_message() {
        let mut mock = MockRecipeAiPort::new();
        mock.expect_suggest_substitutes()
            .returning(|_| Err(GenerationError::Backend("503".to_string())));

        let err = assistant(mock)
            .suggest_substitutes("Soup", "Salt")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), SUBSTITUTION_FAILED);
    }

    #[tokio::test]
    async fn test_draft_from_photo() {
        let mut mock = MockRecipeAiPort::new();
        mock.expect_recipe_from_image()
            .withf(|photo| photo.mime_type() == "image/png")
            .times(1)
            .returning(|_| {
                Ok(GeneratedRecipe {
                    title: "Spicy Tuna Poke Bowl".to_string(),
                    cuisine: "japanese".to_string(),
                    ingredients: vec!["Tuna".to_string(), "Rice".to_string()],
                    instructions: vec!["Cube tuna".to_string(), "Assemble".to_string()],
                })
            });

        let draft = assistant(mock).draft_from_photo(PNG_DATA_URI).await.unwrap();
        assert_eq!(draft.title, "Spicy Tuna Poke Bowl");
        assert_eq!(draft.cuisine, Cuisine::Japanese);
        assert_eq!(draft.image_hint, "spicy tuna");
        assert!(draft.image.is_inline());
        assert!(draft.normalize().is_ok());
    }

    #[tokio::test]
    async fn test_unknown_cuisine_maps_to_other() {
        let mut mock = MockRecipeAiPort::new();
        mock.expect_recipe_from_image().returning(|_| {
            Ok(GeneratedRecipe {
                title: "Ceviche".to_string(),
                cuisine: "Peruvian".to_string(),
                ingredients: vec!["Fish".to_string()],
                instructions: vec!["Cure in lime".to_string()],
            })
        });

        let draft = assistant(mock).draft_from_photo(PNG_DATA_URI).await.unwrap();
        assert_eq!(draft.cuisine, Cuisine::Other);
        assert_eq!(draft.image_hint, "ceviche");
    }

    #[tokio::test]
    async fn test_malformed_photo_is_validation_error() {
        let mut mock = MockRecipeAiPort::new();
        mock.expect_recipe_from_image().times(0);

        let err = assistant(mock)
            .draft_from_photo("not-a-data-uri")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_incomplete_generation_is_failure() {
        let mut mock = MockRecipeAiPort::new();
        mock.expect_recipe_from_image()
            .returning(|_| Ok(GeneratedRecipe::default()));

        let err = assistant(mock)
            .draft_from_photo(PNG_DATA_URI)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), GENERATION_FAILED);
    }

    #[test]
    fn test_image_hint() {
        assert_eq!(image_hint("Classic Beef Stew"), "classic beef");
        assert_eq!(image_hint("  Tea "), "tea");
        assert_eq!(image_hint(""), "");
    }
}
