#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod seed;
pub mod services;
pub mod utils;

// Re-export commonly used types for convenience
pub use domain::{
    Cuisine, DraftError, ImageInput, InlineImage, InlineImageError, NewRecipe,
    PLACEHOLDER_IMAGE_URL, Recipe, RecipeContent, RecipeDraft, RecipeFilter, RecipePatch,
    SYSTEM_OWNER_ID, StoredImage, UnknownCuisine,
};
pub use ports::{
    AssetError, AssetRef, AssetStore, CoreError, FeedSubscription, GeneratedRecipe,
    GenerationError, RecipeAiPort, RecipeFeed, RecipeRepository, RepositoryError,
    SnapshotListener, SubstitutionRequest,
};
pub use seed::{SampleRecipe, sample_recipes};
pub use services::{
    GENERATION_FAILED, KitchenAssistant, RecipeService, SUBSTITUTION_FAILED, SeedOutcome,
};

// Silence unused dev-dependency warnings for crates only used by some test targets
#[cfg(test)]
use tokio_test as _;
#[cfg(test)]
use serde_json as _;
