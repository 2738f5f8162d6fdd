//! Application configuration handling.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::store::RecordStore;

/// Directory name used under the platform config/data directories.
pub const APP_DIR: &str = "gamedex";

/// Runtime configuration, layered from defaults, the optional config
/// file, and `GAMEDEX_`-prefixed environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory the record store keeps its collection blobs in.
    pub data_root: PathBuf,
}

impl AppConfig {
    /// Load configuration from all layers.
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default(
                "data_root",
                RecordStore::default_root().to_string_lossy().to_string(),
            )?
            .add_source(config::File::from(config_path()).required(false))
            .add_source(config::Environment::with_prefix("GAMEDEX"))
            .build()
            .context("failed to load configuration")?;

        settings
            .try_deserialize()
            .context("invalid configuration values")
    }

    /// A record store rooted at the configured data directory.
    pub fn open_store(&self) -> RecordStore {
        RecordStore::new(&self.data_root)
    }
}

/// Path of the user's config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

/// Write a commented starter config file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    let path = config_path();
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let contents = format!(
        "# gamedex configuration\n\
         #\n\
         # Directory the collection blobs are stored in.\n\
         # data_root = \"{}\"\n",
        RecordStore::default_root().display()
    );
    fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_data_directory() -> Result<()> {
        let config = AppConfig::load()?;
        assert!(config.data_root.ends_with(APP_DIR) || config.data_root.is_absolute());
        Ok(())
    }
}
