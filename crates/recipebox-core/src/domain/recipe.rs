//! Recipe domain types.
//!
//! These types represent recipes in the system, independent of any
//! infrastructure concerns (database, asset hosting, etc.).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cuisine::Cuisine;
use super::image::ImageInput;

/// Owner identifier reserved for seeded sample recipes.
pub const SYSTEM_OWNER_ID: &str = "system";

/// Image shown for recipes without an image of their own.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x400";

// ─────────────────────────────────────────────────────────────────────────────
// Persisted Recipe
// ─────────────────────────────────────────────────────────────────────────────

/// A recipe that exists in the document store.
///
/// Use `NewRecipe` for recipes that haven't been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Store-assigned identifier, immutable once assigned.
    pub id: String,
    pub title: String,
    pub cuisine: Cuisine,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Display URL of the recipe image, if any.
    pub image_url: Option<String>,
    /// Asset store path, present only when this system uploaded the image.
    pub image_storage_path: Option<String>,
    /// Short keyword hint for placeholder artwork (e.g. "pasta carbonara").
    #[serde(default)]
    pub image_hint: String,
    /// User that created the recipe. Only this user may change it.
    pub owner_id: String,
    /// Assigned by the store at insert time.
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Whether `requester_id` owns this recipe.
    pub fn is_owned_by(&self, requester_id: &str) -> bool {
        self.owner_id == requester_id
    }

    /// Whether the image lives in the asset store and must be cleaned up with the recipe.
    pub const fn has_managed_image(&self) -> bool {
        self.image_storage_path.is_some()
    }

    /// Image URL to render, falling back to the shared placeholder.
    pub fn display_image_url(&self) -> &str {
        self.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE_URL)
    }

    /// Creation time as an ISO-8601 string with millisecond precision.
    pub fn created_at_iso(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// The user-editable fields of this recipe.
    pub fn content(&self) -> RecipeContent {
        RecipeContent {
            title: self.title.clone(),
            cuisine: self.cuisine,
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
            image_hint: self.image_hint.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Write Types
// ─────────────────────────────────────────────────────────────────────────────

/// Validated, user-editable recipe fields.
///
/// Produced by [`RecipeDraft::normalize`]; every list is non-empty and every
/// line is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeContent {
    pub title: String,
    pub cuisine: Cuisine,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub image_hint: String,
}

/// Resolved image fields as they are written to the document store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImage {
    pub url: Option<String>,
    pub storage_path: Option<String>,
}

impl StoredImage {
    /// An externally hosted image: displayed, never deleted.
    pub fn hosted(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            storage_path: None,
        }
    }

    /// An image uploaded into the asset store by this system.
    pub fn managed(url: impl Into<String>, storage_path: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            storage_path: Some(storage_path.into()),
        }
    }
}

/// A recipe to be inserted (no id or timestamp yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub content: RecipeContent,
    pub image: StoredImage,
    pub owner_id: String,
}

/// A partial document update.
///
/// `content` replaces the editable fields wholesale. `image` is `None` when
/// the stored image fields must be left exactly as they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipePatch {
    pub content: RecipeContent,
    pub image: Option<StoredImage>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Drafts
// ─────────────────────────────────────────────────────────────────────────────

/// Reasons a draft cannot be written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Recipe title is required")]
    EmptyTitle,

    #[error("At least one ingredient is required")]
    NoIngredients,

    #[error("At least one instruction step is required")]
    NoInstructions,
}

/// Form input for creating or updating a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub title: String,
    pub cuisine: Cuisine,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub image: ImageInput,
    pub image_hint: String,
}

impl RecipeDraft {
    /// Create a draft without an image.
    pub fn new(
        title: impl Into<String>,
        cuisine: Cuisine,
        ingredients: Vec<String>,
        instructions: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            cuisine,
            ingredients,
            instructions,
            image: ImageInput::None,
            image_hint: String::new(),
        }
    }

    /// Set the image input.
    #[must_use]
    pub fn with_image(mut self, image: ImageInput) -> Self {
        self.image = image;
        self
    }

    /// Set the placeholder image hint.
    #[must_use]
    pub fn with_image_hint(mut self, hint: impl Into<String>) -> Self {
        self.image_hint = hint.into();
        self
    }

    /// Trim every field, drop blank lines and check required fields.
    pub fn normalize(&self) -> Result<RecipeContent, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }

        let ingredients = non_blank_lines(&self.ingredients);
        if ingredients.is_empty() {
            return Err(DraftError::NoIngredients);
        }

        let instructions = non_blank_lines(&self.instructions);
        if instructions.is_empty() {
            return Err(DraftError::NoInstructions);
        }

        Ok(RecipeContent {
            title: title.to_string(),
            cuisine: self.cuisine,
            ingredients,
            instructions,
            image_hint: self.image_hint.trim().to_string(),
        })
    }
}

fn non_blank_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog Filter
// ─────────────────────────────────────────────────────────────────────────────

/// Catalog search criteria.
///
/// `query` is matched case-insensitively as a substring of the title or of
/// any ingredient. A `None` cuisine matches every cuisine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeFilter {
    pub query: String,
    pub cuisine: Option<Cuisine>,
}

impl RecipeFilter {
    /// Filter by text only.
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            cuisine: None,
        }
    }

    /// Restrict to a single cuisine.
    #[must_use]
    pub const fn with_cuisine(mut self, cuisine: Cuisine) -> Self {
        self.cuisine = Some(cuisine);
        self
    }

    /// Whether `recipe` satisfies this filter.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if self.cuisine.is_some_and(|c| c != recipe.cuisine) {
            return false;
        }

        let needle = self.query.trim().to_lowercase();
        needle.is_empty()
            || recipe.title.to_lowercase().contains(&needle)
            || recipe
                .ingredients
                .iter()
                .any(|ingredient| ingredient.to_lowercase().contains(&needle))
    }
}
