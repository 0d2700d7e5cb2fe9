//! Application configuration from the environment.
//!
//! Variables (all optional):
//!
//! | Variable | Default |
//! |---|---|
//! | `RECIPEBOX_DATA_DIR` | `<platform data dir>/recipebox` |
//! | `RECIPEBOX_DATABASE_PATH` | `<data dir>/data/recipebox.db` |
//! | `RECIPEBOX_ASSET_DIR` | `<data dir>/assets` |
//! | `RECIPEBOX_ASSET_BASE_URL` | `file://<asset dir>` |
//! | `RECIPEBOX_AI_BASE_URL` | OpenAI API root |
//! | `RECIPEBOX_AI_MODEL` | client default |
//! | `RECIPEBOX_AI_API_KEY` | none; AI calls then fail as not configured |
//! | `RECIPEBOX_SEED_ON_START` | `true` |

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};

use recipebox_ai::AiClientConfig;

pub const ENV_DATA_DIR: &str = "RECIPEBOX_DATA_DIR";
pub const ENV_DATABASE_PATH: &str = "RECIPEBOX_DATABASE_PATH";
pub const ENV_ASSET_DIR: &str = "RECIPEBOX_ASSET_DIR";
pub const ENV_ASSET_BASE_URL: &str = "RECIPEBOX_ASSET_BASE_URL";
pub const ENV_AI_BASE_URL: &str = "RECIPEBOX_AI_BASE_URL";
pub const ENV_AI_MODEL: &str = "RECIPEBOX_AI_MODEL";
pub const ENV_AI_API_KEY: &str = "RECIPEBOX_AI_API_KEY";
pub const ENV_SEED_ON_START: &str = "RECIPEBOX_SEED_ON_START";

/// Bootstrap configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `SQLite` database file.
    pub database_path: PathBuf,
    /// Root directory of the asset store.
    pub asset_dir: PathBuf,
    /// Public URL the asset directory is served from.
    pub asset_base_url: String,
    /// AI client settings.
    pub ai: AiClientConfig,
    /// Load the sample catalog into an empty database at startup.
    pub seed_on_start: bool,
}

impl AppConfig {
    /// Configuration rooted at `data_dir` with every other setting at its
    /// default.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let asset_dir = data_dir.join("assets");
        Self {
            database_path: data_dir.join("data").join("recipebox.db"),
            asset_base_url: file_url(&asset_dir),
            asset_dir,
            ai: AiClientConfig::new(),
            seed_on_start: true,
        }
    }

    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = match get(ENV_DATA_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        let mut config = Self::with_data_dir(data_dir);

        if let Some(path) = get(ENV_DATABASE_PATH) {
            config.database_path = PathBuf::from(path);
        }
        if let Some(dir) = get(ENV_ASSET_DIR) {
            config.asset_dir = PathBuf::from(dir);
            config.asset_base_url = file_url(&config.asset_dir);
        }
        if let Some(url) = get(ENV_ASSET_BASE_URL) {
            config.asset_base_url = url;
        }

        if let Some(url) = get(ENV_AI_BASE_URL) {
            config.ai = config.ai.with_base_url(url);
        }
        if let Some(model) = get(ENV_AI_MODEL) {
            config.ai = config.ai.with_model(model);
        }
        config.ai = config.ai.with_optional_api_key(get(ENV_AI_API_KEY));

        if let Some(raw) = get(ENV_SEED_ON_START) {
            config.seed_on_start =
                parse_bool(&raw).with_context(|| format!("Invalid {ENV_SEED_ON_START}"))?;
        }

        Ok(config)
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir()
        .ok_or_else(|| anyhow!("Cannot determine a data directory; set {ENV_DATA_DIR}"))?;
    Ok(base.join("recipebox"))
}

fn file_url(dir: &std::path::Path) -> String {
    format!("file://{}", dir.display())
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got {other:?}"),
    }
}
