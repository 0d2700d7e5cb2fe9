//! Row mapping helpers for `SQLite` queries.

use chrono::{DateTime, NaiveDateTime, Utc};
use recipebox_core::{Cuisine, Recipe, RepositoryError};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::warn;

/// Shared SELECT column list for recipe queries.
pub const RECIPE_SELECT_COLUMNS: &str = "id, title, cuisine, ingredients, instructions, image_url, image_storage_path, image_hint, owner_id, created_at";

/// Map a driver error onto the port error.
pub fn storage_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Unavailable(e.to_string())
}

/// Parse datetime strings written by `strftime` (optionally with a "UTC" suffix).
pub fn parse_datetime(datetime_str: Option<&str>) -> Option<DateTime<Utc>> {
    datetime_str.and_then(|s| {
        let trimmed = s.trim_end_matches(" UTC");
        NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f")
            .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.with_timezone(&Utc)))
    })
}

/// Encode a line list as a JSON array column.
pub fn lines_to_json(lines: &[String]) -> Result<String, RepositoryError> {
    serde_json::to_string(lines).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

fn json_to_lines(json: &str, column: &str) -> Result<Vec<String>, RepositoryError> {
    serde_json::from_str(json)
        .map_err(|e| RepositoryError::Serialization(format!("{column}: {e}")))
}

/// Parse a database row into a Recipe.
pub fn row_to_recipe(row: &SqliteRow) -> Result<Recipe, RepositoryError> {
    let id: String = row.try_get("id").map_err(storage_error)?;

    let cuisine_str: String = row.try_get("cuisine").map_err(storage_error)?;
    let cuisine = cuisine_str.parse().unwrap_or_else(|_| {
        warn!(recipe_id = %id, cuisine = %cuisine_str, "Unknown stored cuisine, using Other");
        Cuisine::Other
    });

    let ingredients_json: String = row.try_get("ingredients").map_err(storage_error)?;
    let instructions_json: String = row.try_get("instructions").map_err(storage_error)?;

    let created_at_str: Option<String> = row.try_get("created_at").map_err(storage_error)?;
    let created_at = parse_datetime(created_at_str.as_deref()).unwrap_or_else(|| {
        warn!(recipe_id = %id, raw = ?created_at_str, "Undecodable created_at, using current time");
        Utc::now()
    });

    Ok(Recipe {
        title: row.try_get("title").map_err(storage_error)?,
        cuisine,
        ingredients: json_to_lines(&ingredients_json, "ingredients")?,
        instructions: json_to_lines(&instructions_json, "instructions")?,
        image_url: row.try_get("image_url").map_err(storage_error)?,
        image_storage_path: row.try_get("image_storage_path").map_err(storage_error)?,
        image_hint: row.try_get("image_hint").map_err(storage_error)?,
        owner_id: row.try_get("owner_id").map_err(storage_error)?,
        created_at,
        id,
    })
}
