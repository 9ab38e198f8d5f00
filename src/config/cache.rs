use serde::Deserialize;
use std::env;

use crate::core::Result;

/// Cache store settings. The URL is optional: when unset the service runs
/// with a no-op store and every request recomputes from the warehouse.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub url: Option<String>,
}

impl CacheConfig {
    pub fn from_env() -> Result<Self> {
        Ok(CacheConfig {
            url: env::var("REDIS_URL").ok(),
        })
    }
}
