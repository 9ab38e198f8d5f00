use serde::Deserialize;
use std::env;

use crate::core::{AppError, Result};

/// Warehouse SQL REST API connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseConfig {
    pub account: String,
    pub username: String,
    pub password: String,
    pub warehouse: String,
    pub database: String,
    pub role: String,
    pub statement_timeout_secs: u64,
}

impl WarehouseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(WarehouseConfig {
            account: env::var("SNOWFLAKE_ACCOUNT")
                .map_err(|_| AppError::Configuration("SNOWFLAKE_ACCOUNT not set".to_string()))?,
            username: env::var("SNOWFLAKE_USERNAME")
                .map_err(|_| AppError::Configuration("SNOWFLAKE_USERNAME not set".to_string()))?,
            password: env::var("SNOWFLAKE_PASSWORD")
                .map_err(|_| AppError::Configuration("SNOWFLAKE_PASSWORD not set".to_string()))?,
            warehouse: env::var("SNOWFLAKE_WAREHOUSE")
                .map_err(|_| AppError::Configuration("SNOWFLAKE_WAREHOUSE not set".to_string()))?,
            database: env::var("SNOWFLAKE_DATABASE")
                .map_err(|_| AppError::Configuration("SNOWFLAKE_DATABASE not set".to_string()))?,
            role: env::var("SNOWFLAKE_ROLE").unwrap_or_else(|_| "ACCOUNTADMIN".to_string()),
            statement_timeout_secs: env::var("SNOWFLAKE_STATEMENT_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid SNOWFLAKE_STATEMENT_TIMEOUT_SECS".to_string())
                })?,
        })
    }

    /// SQL API statements endpoint for the configured account.
    pub fn statements_url(&self) -> String {
        format!(
            "https://{}.snowflakecomputing.com/api/v2/statements",
            self.account
        )
    }
}
