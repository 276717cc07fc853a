//! # Configuration Management for Shelterhaus
//!
//! This crate provides the configuration structures for the shelter
//! administration core: where the backing files live and whether sample
//! data is seeded on open.
//!
//! ## TOML File Configuration
//! ```toml
//! seed_on_open = true
//!
//! [storage]
//! data_dir = "./data"
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from shelterhaus.toml (or the SHELTERHAUS_CONFIG path),
//! // falling back to defaults when no file exists
//! let config = AppConfig::load().unwrap();
//!
//! // Or load from a custom path
//! let config = AppConfig::from_file("config/production.toml").unwrap();
//! ```
//!
//! Environment overrides (read after the file): `SHELTERHAUS_DATA_DIR`,
//! `SHELTERHAUS_SEED`.

use serde::{Deserialize, Serialize};
use std::{
    env,
    path::{Path, PathBuf},
};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./shelterhaus.toml";
const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    /// Populate missing backing files with sample records when the facade
    /// opens.
    pub seed_on_open: bool,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one JSON backing file per entity type.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            seed_on_open: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the TOML file named in `SHELTERHAUS_CONFIG`,
    /// or from `./shelterhaus.toml`, or fall back to defaults when neither
    /// exists. Environment overrides are applied last.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine; variables may come from the process
        // environment directly.
        let _ = dotenvy::dotenv();

        let mut config = if let Ok(config_path) = env::var("SHELTERHAUS_CONFIG") {
            Self::from_file(&config_path)?
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SHELTERHAUS_*` environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(data_dir) = env::var("SHELTERHAUS_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(data_dir);
        }
        if let Ok(seed) = env::var("SHELTERHAUS_SEED") {
            self.seed_on_open = matches!(seed.as_str(), "1" | "true" | "yes");
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "Storage data_dir cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
