use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

pub const DEFAULT_DB_PATH: &str = "data/newslens.sqlite";
const CONFIG_FILE: &str = "newslens";

/// Plumbing settings. Analysis weights are constants and never read from here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub db_path: PathBuf,
    pub default_user: String,
    pub batch_chunk_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            default_user: "local".to_string(),
            batch_chunk_size: 500,
        }
    }
}

impl Settings {
    /// Defaults, then `./newslens.{toml,json,...}` if present, then `NEWSLENS_*`.
    pub fn load() -> Result<Self> {
        Self::load_from(File::with_name(CONFIG_FILE).required(false))
    }

    fn load_from<S>(file: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = Settings::default();
        let settings: Settings = Config::builder()
            .set_default("db_path", DEFAULT_DB_PATH)?
            .set_default("default_user", defaults.default_user)?
            .set_default("batch_chunk_size", defaults.batch_chunk_size as i64)?
            .add_source(file)
            .add_source(Environment::with_prefix("NEWSLENS"))
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")?;

        if settings.batch_chunk_size == 0 {
            anyhow::bail!("batch_chunk_size must be at least 1");
        }
        Ok(settings)
    }
}
