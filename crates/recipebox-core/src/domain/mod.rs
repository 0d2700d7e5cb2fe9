//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (database, asset hosting, etc.).
//!
//! # Structure
//!
//! - `recipe` - Recipe types (`Recipe`, `NewRecipe`, `RecipeDraft`, `RecipeFilter`)
//! - `cuisine` - The closed set of cuisine tags
//! - `image` - Inline image decoding and draft image inputs

mod cuisine;
mod image;
mod recipe;

pub use cuisine::{Cuisine, UnknownCuisine};
pub use image::{ImageInput, InlineImage, InlineImageError};
pub use recipe::{
    DraftError, NewRecipe, PLACEHOLDER_IMAGE_URL, Recipe, RecipeContent, RecipeDraft,
    RecipeFilter, RecipePatch, SYSTEM_OWNER_ID, StoredImage,
};
