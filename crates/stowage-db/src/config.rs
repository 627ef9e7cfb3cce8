//! # Configuration
//!
//! Settings for the catalog store and recommendation requests.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOWAGE_DB_PATH=/data/stowage.db                                   │
//! │     STOWAGE_MAX_CONNECTIONS=5                                          │
//! │     STOWAGE_RECOMMENDATION_COUNT=3                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     explicit path, or ~/.config/stowage/stowage.toml (Linux)           │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [database]
//! path = "/var/lib/stowage/stowage.db"
//! max_connections = 5
//! min_connections = 1
//! connect_timeout_secs = 30
//! busy_timeout_secs = 5
//!
//! [recommendations]
//! count = 3
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use stowage_core::DEFAULT_RECOMMENDATION_COUNT;
use thiserror::Error;
use tracing::{debug, info};

use crate::pool::DbConfig;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Sections
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file path. Created on first start.
    pub path: PathBuf,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    /// How long a connection waits on a locked database before failing.
    pub busy_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: StowageConfig::default_database_path(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 30,
            busy_timeout_secs: 5,
        }
    }
}

/// `[recommendations]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationSettings {
    /// Suggestions requested per call.
    pub count: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        RecommendationSettings {
            count: DEFAULT_RECOMMENDATION_COUNT,
        }
    }
}

// =============================================================================
// StowageConfig
// =============================================================================

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StowageConfig {
    pub database: DatabaseSettings,
    pub recommendations: RecommendationSettings,
}

impl StowageConfig {
    /// Loads configuration: defaults, then file, then environment.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document. Missing keys fall back to defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `STOWAGE_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("STOWAGE_DB_PATH") {
            self.database.path = PathBuf::from(path);
        }

        if let Some(max) = lookup("STOWAGE_MAX_CONNECTIONS") {
            self.database.max_connections = max
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOWAGE_MAX_CONNECTIONS".to_string()))?;
        }

        if let Some(count) = lookup("STOWAGE_RECOMMENDATION_COUNT") {
            self.recommendations.count = count.parse().map_err(|_| {
                ConfigError::InvalidValue("STOWAGE_RECOMMENDATION_COUNT".to_string())
            })?;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid(
                "database.min_connections cannot exceed max_connections".into(),
            ));
        }

        stowage_core::validation::validate_recommendation_count(self.recommendations.count)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(())
    }

    /// Platform config file location, e.g. `~/.config/stowage/stowage.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "stowage", "stowage")
            .map(|dirs| dirs.config_dir().join("stowage.toml"))
    }

    /// Platform data file location, falling back to the working directory.
    pub fn default_database_path() -> PathBuf {
        directories::ProjectDirs::from("org", "stowage", "stowage")
            .map(|dirs| dirs.data_dir().join("stowage.db"))
            .unwrap_or_else(|| PathBuf::from("stowage.db"))
    }

    /// Pool configuration derived from the `[database]` section.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database.path)
            .max_connections(self.database.max_connections)
            .min_connections(self.database.min_connections)
            .connect_timeout(Duration::from_secs(self.database.connect_timeout_secs))
            .busy_timeout(Duration::from_secs(self.database.busy_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = StowageConfig::from_toml_str(
            r#"
            [database]
            path = "/tmp/catalog.db"
            max_connections = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.database.path, PathBuf::from("/tmp/catalog.db"));
        assert_eq!(config.database.max_connections, 8);
        assert_eq!(config.database.busy_timeout_secs, 5);
        assert_eq!(config.recommendations.count, DEFAULT_RECOMMENDATION_COUNT);
    }

    #[test]
    fn test_env_overrides_win() {
        let env: HashMap<&str, &str> = [
            ("STOWAGE_DB_PATH", "/data/override.db"),
            ("STOWAGE_RECOMMENDATION_COUNT", "5"),
        ]
        .into_iter()
        .collect();

        let mut config = StowageConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.database.path, PathBuf::from("/data/override.db"));
        assert_eq!(config.recommendations.count, 5);
    }

    #[test]
    fn test_bad_override_is_rejected() {
        let mut config = StowageConfig::default();
        let result = config.apply_overrides(|key| {
            (key == "STOWAGE_MAX_CONNECTIONS").then(|| "many".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_validate() {
        assert!(StowageConfig::default().validate().is_ok());

        let mut config = StowageConfig::default();
        config.recommendations.count = 0;
        assert!(config.validate().is_err());

        let mut config = StowageConfig::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_db_config_conversion() {
        let mut config = StowageConfig::default();
        config.database.max_connections = 3;
        let db = config.db_config();
        assert_eq!(db.max_connections, 3);
        assert_eq!(db.busy_timeout, Duration::from_secs(5));
    }
}
