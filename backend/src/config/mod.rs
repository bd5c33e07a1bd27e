//! Configuration management for the AIQO backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: AIQO__)

use aiqo_shared::DayDefaults;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::AppResult;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    #[serde(default)]
    pub day: DayDefaults,
    #[serde(default)]
    pub timers: TimerConfig,
}

/// Which key-value backend to open at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local, lost on exit
    Memory,
    /// Single JSON document on disk, like a browser local store
    #[default]
    File,
    /// SQLite key-value table
    Sqlite,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub file_path: PathBuf,
    pub sqlite_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            file_path: PathBuf::from("data/aiqo_store.json"),
            sqlite_url: "sqlite://data/aiqo.db?mode=rwc".to_string(),
        }
    }
}

/// Timer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Default rest between sets
    pub rest_secs: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self { rest_secs: 90 }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with AIQO__ prefix
    pub fn load() -> AppResult<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (AIQO__ prefix)
            // e.g., AIQO__STORAGE__BACKEND=sqlite sets storage.backend
            .add_source(config::Environment::with_prefix("AIQO").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.timers.rest_secs, 90);
        assert_eq!(config.day.step_goal, 10_000);
    }

    #[test]
    fn test_defaults_survive_config_builder() {
        let built = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default()).unwrap())
            .build()
            .unwrap();
        let config: AppConfig = built.try_deserialize().unwrap();
        assert_eq!(config.storage.sqlite_url, StorageConfig::default().sqlite_url);
        assert_eq!(config.day, DayDefaults::default());
    }

    #[test]
    fn test_backend_names() {
        let backend: StorageBackend = serde_json::from_str("\"sqlite\"").unwrap();
        assert_eq!(backend, StorageBackend::Sqlite);
    }

    #[test]
    fn test_is_production() {
        // Default should be false (development)
        assert!(!AppConfig::is_production());
    }
}
