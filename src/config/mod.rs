use serde::Deserialize;
use std::env;

use crate::core::{AppError, Result};

pub mod cache;
pub mod server;
pub mod warehouse;

pub use cache::CacheConfig;
pub use server::ServerConfig;
pub use warehouse::WarehouseConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub warehouse: WarehouseConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Ok(Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            server: ServerConfig::from_env()?,
            warehouse: WarehouseConfig::from_env()?,
            cache: CacheConfig::from_env()?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.warehouse.statement_timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Statement timeout must be greater than 0".to_string(),
            ));
        }

        if self.warehouse.account.is_empty() {
            return Err(AppError::Configuration(
                "Warehouse account must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
