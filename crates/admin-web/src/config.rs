//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use database::PLACEHOLDER_OWNER_ID;

/// Admin web server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Owner id recorded on created prompts and agents.
    pub owner_id: String,
    /// Directory served under `/static`.
    pub static_dir: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `ADMIN_ADDR` | Server bind address | `127.0.0.1:8788` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:agenthub.db?mode=rwc` |
    /// | `ADMIN_OWNER_ID` | Owner of created records | nil UUID |
    /// | `ADMIN_STATIC_DIR` | Static asset directory | `static` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("ADMIN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8788".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:agenthub.db?mode=rwc".to_string());

        let owner_id = env::var("ADMIN_OWNER_ID")
            .unwrap_or_else(|_| PLACEHOLDER_OWNER_ID.to_string());
        if owner_id.trim().is_empty() {
            return Err(ConfigError::BlankOwnerId);
        }

        let static_dir = env::var("ADMIN_STATIC_DIR").unwrap_or_else(|_| "static".to_string());

        Ok(Self {
            addr,
            database_url,
            owner_id,
            static_dir,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid ADMIN_ADDR format")]
    InvalidAddr,

    #[error("ADMIN_OWNER_ID must not be blank")]
    BlankOwnerId,
}
