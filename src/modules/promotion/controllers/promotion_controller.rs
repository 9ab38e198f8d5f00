use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::cache::ReportCache;
use crate::core::brands;
use crate::core::{calendar, AppError, Result};
use crate::modules::promotion::services::PromotionService;
use crate::warehouse::WarehouseClient;

/// Query parameters for the promotion endpoint
#[derive(Debug, Deserialize)]
pub struct PromotionQuery {
    /// Brand code, required (M, I, X, V, ST, W)
    #[serde(default)]
    pub brand: Option<String>,
    /// Bypass the cache and recompute when set to "true"
    #[serde(rename = "forceUpdate", default)]
    pub force_update: Option<String>,
}

/// GET /api/promotion
///
/// Promotion price list for one brand over the rolling two-month lookback
/// window.
pub async fn get_promotion(
    warehouse: web::Data<dyn WarehouseClient>,
    cache: web::Data<ReportCache>,
    query: web::Query<PromotionQuery>,
) -> Result<HttpResponse> {
    let brand_code = query
        .brand
        .as_deref()
        .ok_or_else(|| AppError::validation("brand code is required"))?;
    let brand = brands::find_brand(brand_code)
        .ok_or_else(|| AppError::validation(format!("unknown brand code '{brand_code}'")))?;

    let service = PromotionService::new(warehouse.into_inner(), cache.get_ref().clone());
    let force_update = query.force_update.as_deref() == Some("true");
    let report = service.report(brand, calendar::today(), force_update).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Configure routes for the promotion module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/promotion", web::get().to(get_promotion));
}
