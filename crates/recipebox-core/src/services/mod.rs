//! Core services - the application's business logic layer.
//!
//! Services orchestrate between ports (trait interfaces) and domain logic.
//! They don't know about concrete implementations.

mod kitchen_assistant;
mod recipe_service;

pub use kitchen_assistant::{GENERATION_FAILED, KitchenAssistant, SUBSTITUTION_FAILED};
pub use recipe_service::{RecipeService, SeedOutcome};
