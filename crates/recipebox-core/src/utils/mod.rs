//! Small helpers shared across services.

pub mod asset_path;

pub use asset_path::{owner_segment, path_segment, recipe_image_path};
