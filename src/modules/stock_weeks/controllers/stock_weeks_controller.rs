use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::cache::ReportCache;
use crate::core::{calendar, Result};
use crate::modules::stock_weeks::services::StockWeeksService;
use crate::warehouse::WarehouseClient;

/// Query parameters for the stock-weeks endpoint
#[derive(Debug, Deserialize)]
pub struct StockWeeksQuery {
    /// Bypass the cache and recompute when set to "true"
    #[serde(rename = "forceUpdate", default)]
    pub force_update: Option<String>,
}

/// GET /api/stock-weeks
///
/// Weeks-of-stock base metrics for the accessory assortment at the current
/// and prior-year as-of dates.
pub async fn get_stock_weeks(
    warehouse: web::Data<dyn WarehouseClient>,
    cache: web::Data<ReportCache>,
    query: web::Query<StockWeeksQuery>,
) -> Result<HttpResponse> {
    let service = StockWeeksService::new(warehouse.into_inner(), cache.get_ref().clone());
    let force_update = query.force_update.as_deref() == Some("true");
    let report = service.report(calendar::today(), force_update).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Configure routes for the stock-weeks module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/stock-weeks", web::get().to(get_stock_weeks));
}
