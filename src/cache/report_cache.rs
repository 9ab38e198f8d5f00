use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::store::CacheStore;

/// Fail-soft wrapper over the cache store. A broken or absent cache degrades
/// to a miss or a dropped write, never to a failed request.
#[derive(Clone)]
pub struct ReportCache {
    store: Arc<dyn CacheStore>,
}

impl ReportCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Read a cached report envelope. Any store or decode failure is logged
    /// and reported as a miss.
    pub async fn fetch(&self, key: &str) -> Option<Value> {
        match self.store.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    debug!(key, "cache hit");
                    Some(value)
                }
                Err(error) => {
                    warn!(key, %error, "cache payload unreadable, treating as miss");
                    None
                }
            },
            Ok(None) => {
                debug!(key, "cache miss");
                None
            }
            Err(error) => {
                warn!(key, %error, "cache read failed, treating as miss");
                None
            }
        }
    }

    /// Write a report envelope back. Failures are logged and dropped.
    pub async fn write(&self, key: &str, value: &Value, ttl_seconds: u64) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(key, %error, "cache serialization failed, skipping write");
                return;
            }
        };

        match self.store.set(key, &raw, ttl_seconds).await {
            Ok(()) => debug!(key, ttl_seconds, "cache write complete"),
            Err(error) => warn!(key, %error, "cache write failed, skipping"),
        }
    }
}

/// Annotate an envelope served from cache with the hit marker and the key it
/// was found under.
pub fn mark_served_from_cache(envelope: &mut Value, key: &str) {
    if let Some(object) = envelope.as_object_mut() {
        object.insert("cached".to_string(), Value::Bool(true));
        object.insert("cacheKey".to_string(), Value::String(key.to_string()));
    }
}
