// Cache fail-soft contract tests
//
// The cache is an optimization, never a dependency: a failing or absent
// store changes latency only. A warehouse failure, by contrast, must
// propagate to the caller as a bad-gateway response.

use std::sync::{Arc, Mutex};

use actix_web::{test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};

use salespulse::cache::{CacheStore, NoopStore, ReportCache};
use salespulse::core::{AppError, Result};
use salespulse::modules;
use salespulse::warehouse::{Row, WarehouseClient};

struct FixedWarehouse {
    rows: Vec<Row>,
    calls: Mutex<usize>,
}

impl FixedWarehouse {
    fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            calls: Mutex::new(0),
        }
    }

    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl WarehouseClient for FixedWarehouse {
    async fn execute_query(&self, _sql: &str) -> Result<Vec<Row>> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.rows.clone())
    }
}

/// Store whose every operation fails, as if the cache host were unreachable
struct FailingStore;

#[async_trait]
impl CacheStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(AppError::CacheUnavailable("store offline".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl_seconds: u64) -> Result<()> {
        Err(AppError::CacheUnavailable("store offline".to_string()))
    }

    async fn delete(&self, _key: &str) -> Result<()> {
        Err(AppError::CacheUnavailable("store offline".to_string()))
    }
}

/// Warehouse whose every statement fails
struct FailingWarehouse;

#[async_trait]
impl WarehouseClient for FailingWarehouse {
    async fn execute_query(&self, _sql: &str) -> Result<Vec<Row>> {
        Err(AppError::UpstreamQuery("warehouse down".to_string()))
    }
}

fn sample_rows() -> Vec<Row> {
    vec![serde_json::from_value(json!({
        "GUBUN": "CY", "BRD_CD": "M", "CHNL_CD": "01",
        "TAG_SALES": "100", "REAL_SALES": "90"
    }))
    .unwrap()]
}

#[actix_web::test]
async fn test_request_succeeds_when_cache_store_fails() {
    let warehouse = Arc::new(FixedWarehouse::new(sample_rows()));
    let cache = ReportCache::new(Arc::new(FailingStore));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(
                warehouse.clone() as Arc<dyn WarehouseClient>
            ))
            .app_data(web::Data::new(cache))
            .service(
                web::scope("/api").configure(modules::sales_composition::controllers::configure),
            ),
    )
    .await;

    for _ in 0..2 {
        let resp: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/sales-composition")
                .to_request(),
        )
        .await;
        assert_eq!(resp["success"], json!(true));
        assert_eq!(resp["cached"], json!(false));
    }

    // every request recomputed; the broken store never failed a response
    assert_eq!(warehouse.calls(), 2);
}

#[actix_web::test]
async fn test_noop_store_always_recomputes() {
    let warehouse = Arc::new(FixedWarehouse::new(sample_rows()));
    let cache = ReportCache::new(Arc::new(NoopStore));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(
                warehouse.clone() as Arc<dyn WarehouseClient>
            ))
            .app_data(web::Data::new(cache))
            .service(
                web::scope("/api").configure(modules::sales_composition::controllers::configure),
            ),
    )
    .await;

    for _ in 0..3 {
        let resp: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/sales-composition")
                .to_request(),
        )
        .await;
        assert_eq!(resp["cached"], json!(false));
    }

    assert_eq!(warehouse.calls(), 3);
}

#[actix_web::test]
async fn test_warehouse_failure_returns_bad_gateway() {
    let warehouse: Arc<dyn WarehouseClient> = Arc::new(FailingWarehouse);
    let cache = ReportCache::new(Arc::new(NoopStore));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(warehouse))
            .app_data(web::Data::new(cache))
            .service(web::scope("/api").configure(modules::sales_rate::controllers::configure)),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/sales-rate").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 502);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
}

#[actix_web::test]
async fn test_pure_endpoint_unaffected_by_failing_collaborators() {
    let warehouse: Arc<dyn WarehouseClient> = Arc::new(FailingWarehouse);
    let cache = ReportCache::new(Arc::new(FailingStore));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(warehouse))
            .app_data(web::Data::new(cache))
            .service(web::scope("/api").configure(modules::date_info::controllers::configure)),
    )
    .await;

    let resp: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/calculate-date-info?date=20251117")
            .to_request(),
    )
    .await;
    assert_eq!(resp["success"], json!(true));
    assert_eq!(resp["week"]["start"], json!("2025-11-10"));
}
