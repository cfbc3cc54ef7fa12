//! Receipt API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                      | Default        |
//! |-------------------------------|----------------|
//! | `RECEIPTS_BIND_ADDR`          | `0.0.0.0:8000` |
//! | `RECEIPTS_DB_PATH`            | `receipts.db`  |
//! | `RECEIPTS_DB_MAX_CONNECTIONS` | `5`            |
//! | `RECEIPTS_STORE_TIMEOUT_MS`   | `5000`         |

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use receipt_db::DbConfig;

/// Receipt API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,

    /// SQLite database file (`:memory:` for an ephemeral store)
    pub database_path: PathBuf,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Upper bound on any single store call
    pub store_timeout: Duration,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = ApiConfig {
            bind_addr: lookup("RECEIPTS_BIND_ADDR")
                .unwrap_or_else(|| "0.0.0.0:8000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("RECEIPTS_BIND_ADDR".to_string()))?,

            database_path: lookup("RECEIPTS_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("receipts.db")),

            db_max_connections: lookup("RECEIPTS_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("RECEIPTS_DB_MAX_CONNECTIONS".to_string()))?,

            store_timeout: lookup("RECEIPTS_STORE_TIMEOUT_MS")
                .unwrap_or_else(|| "5000".to_string())
                .parse()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidValue("RECEIPTS_STORE_TIMEOUT_MS".to_string()))?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::OutOfRange("RECEIPTS_DB_MAX_CONNECTIONS".to_string()));
        }

        if config.store_timeout.is_zero() {
            return Err(ConfigError::OutOfRange("RECEIPTS_STORE_TIMEOUT_MS".to_string()));
        }

        Ok(config)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        if self.database_path.as_os_str() == ":memory:" {
            return DbConfig::in_memory();
        }
        DbConfig::new(self.database_path.clone()).max_connections(self.db_max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Value out of range for {0}")]
    OutOfRange(String),
}
