use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::cache::ReportCache;
use crate::core::brands;
use crate::core::fiscal::AnalysisMonth;
use crate::core::{calendar, AppError, Result};
use crate::modules::discount_detail::services::DiscountDetailService;
use crate::warehouse::WarehouseClient;

/// Query parameters for the discount-detail endpoint
#[derive(Debug, Deserialize)]
pub struct DiscountDetailQuery {
    /// Brand code, required (M, I, X, V, ST, W)
    #[serde(default)]
    pub brand: Option<String>,
    /// Analysis month in `YYYY-MM` format; defaults to the current month
    #[serde(default)]
    pub month: Option<String>,
    /// Bypass the cache and recompute when set to "true"
    #[serde(rename = "forceUpdate", default)]
    pub force_update: Option<String>,
}

/// GET /api/discount-detail
///
/// Discount-type sales breakdown for one brand over the analysis month and
/// the comparable prior-year window.
pub async fn get_discount_detail(
    warehouse: web::Data<dyn WarehouseClient>,
    cache: web::Data<ReportCache>,
    query: web::Query<DiscountDetailQuery>,
) -> Result<HttpResponse> {
    let brand_code = query
        .brand
        .as_deref()
        .ok_or_else(|| AppError::validation("brand code is required"))?;
    let brand = brands::find_brand(brand_code)
        .ok_or_else(|| AppError::validation(format!("unknown brand code '{brand_code}'")))?;

    let month = query
        .month
        .as_deref()
        .map(AnalysisMonth::parse)
        .transpose()?;

    let service = DiscountDetailService::new(warehouse.into_inner(), cache.get_ref().clone());
    let force_update = query.force_update.as_deref() == Some("true");
    let report = service
        .report(brand, month, calendar::today(), force_update)
        .await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Configure routes for the discount-detail module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/discount-detail", web::get().to(get_discount_detail));
}
