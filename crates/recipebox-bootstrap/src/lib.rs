//! Composition root for recipebox.
//!
//! This is the only place where concrete adapters are instantiated:
//! - `SQLite` document store and live feed (via recipebox-db)
//! - Filesystem asset store (via recipebox-storage)
//! - Chat completions client (via recipebox-ai)
//!
//! Front ends call [`bootstrap`] once and work with the returned
//! [`RecipeBoxContext`].

mod config;

pub use config::{
    AppConfig, ENV_AI_API_KEY, ENV_AI_BASE_URL, ENV_AI_MODEL, ENV_ASSET_BASE_URL, ENV_ASSET_DIR,
    ENV_DATA_DIR, ENV_DATABASE_PATH, ENV_SEED_ON_START,
};

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use recipebox_ai::DefaultAiClient;
use recipebox_core::{KitchenAssistant, RecipeService, SeedOutcome, sample_recipes};
use recipebox_db::{CoreFactory, setup_database};
use recipebox_storage::FilesystemAssetStore;

/// Fully composed services.
#[derive(Clone)]
pub struct RecipeBoxContext {
    /// Recipe CRUD, search and live listing.
    pub recipes: Arc<RecipeService>,
    /// AI helpers for the recipe form.
    pub assistant: Arc<KitchenAssistant>,
}

/// Initialise the global tracing subscriber.
///
/// Log level is controlled by `RUST_LOG` (default: warn). Calling this more
/// than once is harmless.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
        .ok();
}

/// Build every adapter and service from `config`.
///
/// 1. Opens (or creates) the database and applies the schema
/// 2. Opens the asset directory
/// 3. Builds the recipe service with the live feed attached
/// 4. Builds the AI client and kitchen assistant
/// 5. Seeds the sample catalog if enabled and the database is empty
pub async fn bootstrap(config: AppConfig) -> Result<RecipeBoxContext> {
    let pool = setup_database(&config.database_path)
        .await
        .with_context(|| format!("Failed to open {}", config.database_path.display()))?;

    let assets = FilesystemAssetStore::new(&config.asset_dir, config.asset_base_url.clone())
        .await
        .with_context(|| format!("Failed to open asset dir {}", config.asset_dir.display()))?;

    let recipes = Arc::new(CoreFactory::build_recipe_service(pool, Arc::new(assets)));

    if !config.ai.is_configured() {
        warn!("No AI API key configured; assistant features will fail");
    }
    let ai = DefaultAiClient::new(&config.ai).context("Failed to build AI client")?;
    let assistant = Arc::new(KitchenAssistant::new(Arc::new(ai)));

    if config.seed_on_start {
        let outcome = recipes.seed_if_empty(&sample_recipes()).await?;
        if outcome == SeedOutcome::AlreadyPopulated {
            debug!("Recipe store already populated; skipping seed");
        }
    }

    Ok(RecipeBoxContext { recipes, assistant })
}
