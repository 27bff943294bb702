//! Configuration loading from environment.

use std::env;
use std::path::PathBuf;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub media_root: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let media_root = env::var("MEDIA_ROOT")
            .unwrap_or_else(|_| "media".to_string())
            .into();

        Ok(Self {
            port,
            database_url,
            media_root,
        })
    }
}
