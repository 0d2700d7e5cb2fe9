//! Integration tests for the public service surface.
//!
//! Wires `KitchenAssistant` and `RecipeService` together over in-memory
//! ports, the way an adapter would.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use recipebox_core::{
    AssetError, AssetRef, AssetStore, CoreError, Cuisine, GeneratedRecipe, GenerationError,
    InlineImage, KitchenAssistant, NewRecipe, Recipe, RecipeAiPort, RecipeFilter, RecipePatch,
    RecipeRepository, RecipeService, RepositoryError, SubstitutionRequest,
};

const JPEG_DATA_URI: &str = "data:image/jpeg;base64,/9j/4AAQSkZJRg==";

#[derive(Default)]
struct MemoryRepo {
    recipes: Mutex<Vec<Recipe>>,
}

#[async_trait]
impl RecipeRepository for MemoryRepo {
    async fn insert(&self, recipe: &NewRecipe) -> Result<String, RepositoryError> {
        let mut recipes = self.recipes.lock().unwrap();
        let id = format!("doc-{}", recipes.len());
        recipes.insert(
            0,
            Recipe {
                id: id.clone(),
                title: recipe.content.title.clone(),
                cuisine: recipe.content.cuisine,
                ingredients: recipe.content.ingredients.clone(),
                instructions: recipe.content.instructions.clone(),
                image_url: recipe.image.url.clone(),
                image_storage_path: recipe.image.storage_path.clone(),
                image_hint: recipe.content.image_hint.clone(),
                owner_id: recipe.owner_id.clone(),
                created_at: Utc::now(),
            },
        );
        drop(recipes);
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<Recipe>, RepositoryError> {
        Ok(self.recipes.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn list_ordered(&self) -> Result<Vec<Recipe>, RepositoryError> {
        Ok(self.recipes.lock().unwrap().clone())
    }

    async fn update(&self, id: &str, _patch: &RecipePatch) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.recipes.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }

    async fn exists_any(&self) -> Result<bool, RepositoryError> {
        Ok(!self.recipes.lock().unwrap().is_empty())
    }
}

#[derive(Default)]
struct MemoryAssets {
    files: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl AssetStore for MemoryAssets {
    async fn upload(&self, path: &str, image: &InlineImage) -> Result<AssetRef, AssetError> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), image.mime_type().to_string());
        Ok(AssetRef::new(path))
    }

    async fn resolve_url(&self, asset: &AssetRef) -> Result<String, AssetError> {
        Ok(format!("memory://{}", asset.path))
    }

    async fn delete(&self, path: &str) -> Result<(), AssetError> {
        self.files
            .lock()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}

struct CannedAi;

#[async_trait]
impl RecipeAiPort for CannedAi {
    async fn suggest_substitutes(
        &self,
        _request: &SubstitutionRequest,
    ) -> Result<Vec<String>, GenerationError> {
        Err(GenerationError::NotConfigured("no api key".to_string()))
    }

    async fn recipe_from_image(
        &self,
        _photo: &InlineImage,
    ) -> Result<GeneratedRecipe, GenerationError> {
        Ok(GeneratedRecipe {
            title: "Golden Pancake Stack".to_string(),
            cuisine: "American".to_string(),
            ingredients: vec!["Flour".to_string(), "Buttermilk".to_string()],
            instructions: vec!["Whisk".to_string(), "Fry".to_string()],
        })
    }
}

#[tokio::test]
async fn test_generated_draft_is_saved_with_uploaded_photo() {
    let assets = Arc::new(MemoryAssets::default());
    let recipes = RecipeService::new(Arc::new(MemoryRepo::default()), assets.clone());
    let assistant = KitchenAssistant::new(Arc::new(CannedAi));

    let draft = assistant.draft_from_photo(JPEG_DATA_URI).await.unwrap();
    let id = recipes.create(&draft, "cook-7").await.unwrap();

    let saved = recipes.find(&id).await.unwrap();
    assert_eq!(saved.cuisine, Cuisine::American);
    assert_eq!(saved.image_hint, "golden pancake");

    let path = saved.image_storage_path.unwrap();
    assert!(path.starts_with("recipes/cook-7/"));
    assert!(path.ends_with("_Golden_Pancake_Stack.jpg"));
    assert_eq!(saved.image_url, Some(format!("memory://{path}")));
    assert_eq!(
        assets.files.lock().unwrap().get(&path).map(String::as_str),
        Some("image/jpeg")
    );

    let found = recipes
        .search(&RecipeFilter::text("buttermilk"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn test_unconfigured_backend_is_generation_failure() {
    let assistant = KitchenAssistant::new(Arc::new(CannedAi));

    let err = assistant
        .suggest_substitutes("Pancakes", "Buttermilk")
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::GenerationFailure(_)));
}

#[tokio::test]
async fn test_delete_removes_uploaded_photo() {
    let assets = Arc::new(MemoryAssets::default());
    let recipes = RecipeService::new(Arc::new(MemoryRepo::default()), assets.clone());
    let assistant = KitchenAssistant::new(Arc::new(CannedAi));

    let draft = assistant.draft_from_photo(JPEG_DATA_URI).await.unwrap();
    let id = recipes.create(&draft, "cook-7").await.unwrap();

    tokio_test::assert_err!(recipes.delete(&id, "cook-8").await);
    tokio_test::assert_ok!(recipes.delete(&id, "cook-7").await);

    assert!(assets.files.lock().unwrap().is_empty());
    assert!(recipes.get(&id).await.unwrap().is_none());
}
