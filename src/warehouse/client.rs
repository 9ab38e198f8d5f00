use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::core::Result;

/// One row of a warehouse result set, keyed by column name.
pub type Row = Map<String, Value>;

/// Read-only analytical query execution against the warehouse. SQL text is
/// built by the report services; this seam is opaque to them.
#[async_trait]
pub trait WarehouseClient: Send + Sync {
    async fn execute_query(&self, sql: &str) -> Result<Vec<Row>>;
}
