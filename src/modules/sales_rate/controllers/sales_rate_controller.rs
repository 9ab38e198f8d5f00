use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::cache::ReportCache;
use crate::core::{calendar, Result};
use crate::modules::sales_rate::services::SalesRateService;
use crate::warehouse::WarehouseClient;

/// Query parameters for the sales-rate endpoint
#[derive(Debug, Deserialize)]
pub struct SalesRateQuery {
    /// Bypass the cache and recompute when set to "true"
    #[serde(rename = "forceUpdate", default)]
    pub force_update: Option<String>,
}

/// GET /api/sales-rate
///
/// Season-to-date sell-through by product across the current season, the
/// prior-year season and the prior year-end snapshot.
pub async fn get_sales_rate(
    warehouse: web::Data<dyn WarehouseClient>,
    cache: web::Data<ReportCache>,
    query: web::Query<SalesRateQuery>,
) -> Result<HttpResponse> {
    let service = SalesRateService::new(warehouse.into_inner(), cache.get_ref().clone());
    let force_update = query.force_update.as_deref() == Some("true");
    let report = service.report(calendar::today(), force_update).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Configure routes for the sales-rate module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/sales-rate", web::get().to(get_sales_rate));
}
