mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};
use std::path::PathBuf;

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file
    /// config. TOML values override CLI values where present.
    pub fn resolve(cli_db_path: Option<PathBuf>, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or(cli_db_path)
            .ok_or_else(|| {
                anyhow::anyhow!("database path must be given as an argument or in the config file")
            })?;

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                bail!("Database directory does not exist: {:?}", parent);
            }
        }

        Ok(AppConfig { db_path })
    }
}
