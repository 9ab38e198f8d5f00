use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::WarehouseConfig;
use crate::core::{AppError, Result};

use super::client::{Row, WarehouseClient};

/// Snowflake SQL REST API client (`POST /api/v2/statements`).
///
/// Transient network failures are retried with exponential backoff inside
/// this client; callers see a single `UpstreamQuery` error once retries are
/// exhausted.
pub struct SnowflakeClient {
    http: ClientWithMiddleware,
    config: WarehouseConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatementResponse {
    #[serde(default)]
    data: Vec<Vec<Value>>,
    result_set_meta_data: Option<ResultSetMetaData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultSetMetaData {
    row_type: Vec<ColumnType>,
}

#[derive(Debug, Deserialize)]
struct ColumnType {
    name: String,
}

impl SnowflakeClient {
    pub fn new(config: WarehouseConfig) -> Self {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
        let http = ClientBuilder::new(reqwest::Client::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();
        Self { http, config }
    }
}

#[async_trait]
impl WarehouseClient for SnowflakeClient {
    async fn execute_query(&self, sql: &str) -> Result<Vec<Row>> {
        let body = json!({
            "statement": sql,
            "timeout": self.config.statement_timeout_secs,
            "warehouse": self.config.warehouse,
            "database": self.config.database,
            "role": self.config.role,
        });

        debug!(url = %self.config.statements_url(), "dispatching warehouse statement");

        let response = self
            .http
            .post(self.config.statements_url())
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::UpstreamQuery(format!("warehouse request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamQuery(format!(
                "warehouse returned {status}: {detail}"
            )));
        }

        let statement: StatementResponse = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamQuery(format!("unreadable warehouse response: {e}")))?;

        let rows = parse_result_set(statement);
        info!(rows = rows.len(), "warehouse statement complete");
        Ok(rows)
    }
}

/// Zip the `rowType` column names with each positional value array.
fn parse_result_set(statement: StatementResponse) -> Vec<Row> {
    let columns: Vec<String> = statement
        .result_set_meta_data
        .map(|meta| meta.row_type.into_iter().map(|col| col.name).collect())
        .unwrap_or_default();

    statement
        .data
        .into_iter()
        .map(|values| columns.iter().cloned().zip(values).collect::<Row>())
        .collect()
}
