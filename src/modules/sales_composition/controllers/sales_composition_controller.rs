use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::cache::ReportCache;
use crate::core::fiscal::AnalysisMonth;
use crate::core::{calendar, Result};
use crate::modules::sales_composition::services::SalesCompositionService;
use crate::warehouse::WarehouseClient;

/// Query parameters for the sales-composition endpoint
#[derive(Debug, Deserialize)]
pub struct SalesCompositionQuery {
    /// Analysis month in `YYYY-MM` format; defaults to the current month
    #[serde(default)]
    pub month: Option<String>,
    /// Bypass the cache and recompute when set to "true"
    #[serde(rename = "forceUpdate", default)]
    pub force_update: Option<String>,
}

/// GET /api/sales-composition
///
/// Month-to-date TAG and net sales by brand, channel and category for the
/// analysis month, with the comparable prior-year window.
pub async fn get_sales_composition(
    warehouse: web::Data<dyn WarehouseClient>,
    cache: web::Data<ReportCache>,
    query: web::Query<SalesCompositionQuery>,
) -> Result<HttpResponse> {
    let month = query
        .month
        .as_deref()
        .map(AnalysisMonth::parse)
        .transpose()?;

    let service = SalesCompositionService::new(warehouse.into_inner(), cache.get_ref().clone());
    let force_update = query.force_update.as_deref() == Some("true");
    let report = service
        .report(month, calendar::today(), force_update)
        .await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Configure routes for the sales-composition module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/sales-composition", web::get().to(get_sales_composition));
}
