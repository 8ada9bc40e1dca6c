//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `CATALOG_DB_PATH` | `./catalog.db` |
//! | `CATALOG_DB_MAX_CONNECTIONS` | `5` |
//! | `CATALOG_RUN_MIGRATIONS` | `true` |

use catalog_db::DbConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// SQLite database file
    pub db_path: PathBuf,

    /// Pool size upper bound
    pub max_connections: u32,

    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = ApiConfig {
            db_path: lookup("CATALOG_DB_PATH")
                .unwrap_or_else(|| "./catalog.db".to_string())
                .into(),

            max_connections: lookup("CATALOG_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CATALOG_DB_MAX_CONNECTIONS".to_string()))?,

            run_migrations: lookup("CATALOG_RUN_MIGRATIONS")
                .unwrap_or_else(|| "true".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CATALOG_RUN_MIGRATIONS".to_string()))?,
        };

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "CATALOG_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::file(&self.db_path)
            .max_connections(self.max_connections)
            .run_migrations(self.run_migrations)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
