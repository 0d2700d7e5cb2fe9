//! `SQLite` implementation of the `RecipeRepository` trait.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use recipebox_core::{NewRecipe, Recipe, RecipePatch, RecipeRepository, RepositoryError};

use super::change_notifier::{RecipeChange, RecipeChangeNotifier};
use super::row_mappers::{RECIPE_SELECT_COLUMNS, lines_to_json, row_to_recipe, storage_error};

/// `SQLite` implementation of the `RecipeRepository` trait.
///
/// Every committed mutation is published on the attached
/// [`RecipeChangeNotifier`].
pub struct SqliteRecipeRepository {
    pool: SqlitePool,
    notifier: Arc<RecipeChangeNotifier>,
}

impl SqliteRecipeRepository {
    /// Create a new repository with its own change notifier.
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_notifier(pool, Arc::new(RecipeChangeNotifier::new()))
    }

    /// Create a repository that publishes to an existing notifier.
    pub fn with_notifier(pool: SqlitePool, notifier: Arc<RecipeChangeNotifier>) -> Self {
        Self { pool, notifier }
    }

    /// The notifier fed by this repository.
    pub fn notifier(&self) -> Arc<RecipeChangeNotifier> {
        Arc::clone(&self.notifier)
    }
}

#[async_trait]
impl RecipeRepository for SqliteRecipeRepository {
    async fn insert(&self, recipe: &NewRecipe) -> Result<String, RepositoryError> {
        let id = Uuid::new_v4().simple().to_string();
        let content = &recipe.content;

        sqlx::query(
            r#"
            INSERT INTO recipes (
                id, title, cuisine, ingredients, instructions,
                image_url, image_storage_path, image_hint, owner_id
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&content.title)
        .bind(content.cuisine.as_str())
        .bind(lines_to_json(&content.ingredients)?)
        .bind(lines_to_json(&content.instructions)?)
        .bind(&recipe.image.url)
        .bind(&recipe.image.storage_path)
        .bind(&content.image_hint)
        .bind(&recipe.owner_id)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        debug!(recipe_id = %id, "Inserted recipe row");
        self.notifier.notify(RecipeChange::Inserted(id.clone()));
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<Recipe>, RepositoryError> {
        let sql = format!("SELECT {RECIPE_SELECT_COLUMNS} FROM recipes WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(row_to_recipe).transpose()
    }

    async fn list_ordered(&self) -> Result<Vec<Recipe>, RepositoryError> {
        let sql = format!(
            "SELECT {RECIPE_SELECT_COLUMNS} FROM recipes ORDER BY created_at DESC, seq DESC"
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        rows.iter().map(row_to_recipe).collect()
    }

    async fn update(&self, id: &str, patch: &RecipePatch) -> Result<(), RepositoryError> {
        let content = &patch.content;
        let ingredients = lines_to_json(&content.ingredients)?;
        let instructions = lines_to_json(&content.instructions)?;

        let result = match &patch.image {
            Some(image) => {
                sqlx::query(
                    r#"
                    UPDATE recipes SET
                        title = ?, cuisine = ?, ingredients = ?, instructions = ?,
                        image_hint = ?, image_url = ?, image_storage_path = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&content.title)
                .bind(content.cuisine.as_str())
                .bind(&ingredients)
                .bind(&instructions)
                .bind(&content.image_hint)
                .bind(&image.url)
                .bind(&image.storage_path)
                .bind(id)
                .execute(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    UPDATE recipes SET
                        title = ?, cuisine = ?, ingredients = ?, instructions = ?, image_hint = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&content.title)
                .bind(content.cuisine.as_str())
                .bind(&ingredients)
                .bind(&instructions)
                .bind(&content.image_hint)
                .bind(id)
                .execute(&self.pool)
                .await
            }
        }
        .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("recipe {id}")));
        }

        self.notifier.notify(RecipeChange::Updated(id.to_string()));
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("recipe {id}")));
        }

        self.notifier.notify(RecipeChange::Deleted(id.to_string()));
        Ok(())
    }

    async fn exists_any(&self) -> Result<bool, RepositoryError> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM recipes)")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(exists != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;
    use recipebox_core::{Cuisine, RecipeContent, StoredImage};

    async fn repo() -> SqliteRecipeRepository {
        SqliteRecipeRepository::new(setup_test_database().await.unwrap())
    }

    fn new_recipe(title: &str, owner: &str) -> NewRecipe {
        NewRecipe {
            content: RecipeContent {
                title: title.to_string(),
                cuisine: Cuisine::Japanese,
                ingredients: vec!["Dashi".to_string(), "Miso".to_string()],
                instructions: vec!["Warm dashi".to_string(), "Whisk in miso".to_string()],
                image_hint: "miso soup".to_string(),
            },
            image: StoredImage::default(),
            owner_id: owner.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = repo().await;
        let id = repo.insert(&new_recipe("Miso Soup", "u1")).await.unwrap();
        assert_eq!(id.len(), 32);

        let recipe = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(recipe.id, id);
        assert_eq!(recipe.title, "Miso Soup");
        assert_eq!(recipe.cuisine, Cuisine::Japanese);
        assert_eq!(recipe.ingredients, vec!["Dashi", "Miso"]);
        assert_eq!(recipe.image_hint, "miso soup");
        assert_eq!(recipe.owner_id, "u1");
        assert!(recipe.image_url.is_none());
        assert!(recipe.image_storage_path.is_none());
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = repo().await;
        assert!(repo.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = repo().await;
        let a = repo.insert(&new_recipe("A", "u1")).await.unwrap();
        let b = repo.insert(&new_recipe("B", "u1")).await.unwrap();
        let c = repo.insert(&new_recipe("C", "u1")).await.unwrap();

        let ids: Vec<_> = repo
            .list_ordered()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![c, b, a]);
    }

    #[tokio::test]
    async fn test_list_orders_by_created_at_before_insertion() {
        let repo = repo().await;
        let early = repo.insert(&new_recipe("Early", "u1")).await.unwrap();
        let late = repo.insert(&new_recipe("Late", "u1")).await.unwrap();

        sqlx::query("UPDATE recipes SET created_at = '2099-01-01 00:00:00.000' WHERE id = ?")
            .bind(&early)
            .execute(&repo.pool)
            .await
            .unwrap();

        let ids: Vec<_> = repo
            .list_ordered()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![early, late]);
    }

    #[tokio::test]
    async fn test_update_without_image_keeps_image_columns() {
        let repo = repo().await;
        let mut recipe = new_recipe("Miso Soup", "u1");
        recipe.image = StoredImage::managed("http://a/x.png", "recipes/u1/x.png");
        let id = repo.insert(&recipe).await.unwrap();

        let mut content = recipe.content.clone();
        content.title = "Red Miso Soup".to_string();
        repo.update(&id, &RecipePatch { content, image: None })
            .await
            .unwrap();

        let stored = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Red Miso Soup");
        assert_eq!(stored.image_url.as_deref(), Some("http://a/x.png"));
        assert_eq!(stored.image_storage_path.as_deref(), Some("recipes/u1/x.png"));
    }

    #[tokio::test]
    async fn test_update_with_image_replaces_image_columns() {
        let repo = repo().await;
        let recipe = new_recipe("Miso Soup", "u1");
        let id = repo.insert(&recipe).await.unwrap();
        let before = repo.get(&id).await.unwrap().unwrap();

        repo.update(
            &id,
            &RecipePatch {
                content: recipe.content.clone(),
                image: Some(StoredImage::managed("http://a/y.png", "recipes/u1/y.png")),
            },
        )
        .await
        .unwrap();

        let stored = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.image_storage_path.as_deref(), Some("recipes/u1/y.png"));
        assert_eq!(stored.owner_id, before.owner_id);
        assert_eq!(stored.created_at, before.created_at);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_are_not_found() {
        let repo = repo().await;
        let patch = RecipePatch {
            content: new_recipe("X", "u1").content,
            image: None,
        };
        assert!(matches!(
            repo.update("missing", &patch).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete("missing").await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_and_exists_any() {
        let repo = repo().await;
        assert!(!repo.exists_any().await.unwrap());

        let id = repo.insert(&new_recipe("Miso Soup", "u1")).await.unwrap();
        assert!(repo.exists_any().await.unwrap());

        repo.delete(&id).await.unwrap();
        assert!(!repo.exists_any().await.unwrap());
        assert!(repo.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_undecodable_timestamp_falls_back_to_now() {
        let repo = repo().await;
        let id = repo.insert(&new_recipe("Miso Soup", "u1")).await.unwrap();
        sqlx::query("UPDATE recipes SET created_at = 'not a date' WHERE id = ?")
            .bind(&id)
            .execute(&repo.pool)
            .await
            .unwrap();

        let before = chrono::Utc::now();
        let recipe = repo.get(&id).await.unwrap().unwrap();
        assert!(recipe.created_at >= before);
    }

    #[tokio::test]
    async fn test_mutations_are_broadcast() {
        let repo = repo().await;
        let mut rx = repo.notifier().subscribe();

        let id = repo.insert(&new_recipe("Miso Soup", "u1")).await.unwrap();
        repo.delete(&id).await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), RecipeChange::Inserted(id.clone()));
        assert_eq!(rx.recv().await.unwrap(), RecipeChange::Deleted(id));
    }
}
