use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::fiscal::{self, AnalysisMonth};
use crate::core::{calendar, AppError, Result};
use crate::modules::date_info::models::{DateInfoResponse, WeekInfo};

/// Query parameters for the calculate-date-info endpoint
#[derive(Debug, Deserialize)]
pub struct DateInfoQuery {
    /// Weekly update date in `YYYYMMDD` format, required
    #[serde(default)]
    pub date: Option<String>,
}

/// GET /api/calculate-date-info
///
/// Pure week-window calculation for a weekly update date: the preceding
/// Monday-to-Sunday report week and the comparable week 52 weeks earlier.
/// No warehouse access and no cache.
pub async fn get_date_info(query: web::Query<DateInfoQuery>) -> Result<HttpResponse> {
    let raw = query
        .date
        .as_deref()
        .ok_or_else(|| AppError::invalid_period("date parameter is required (YYYYMMDD)"))?;
    let update_date = calendar::parse_compact_date(raw)?;

    let week = fiscal::resolve_week_window(update_date);

    let response = DateInfoResponse {
        success: true,
        update_date: calendar::iso_date(update_date),
        update_date_formatted: calendar::dotted_date(update_date),
        week: WeekInfo::new(week.week_start, week.week_end),
        current_month: AnalysisMonth::of(update_date).to_string(),
        prev_year_week: WeekInfo::new(week.prior_year_start, week.prior_year_end),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Configure routes for the date-info module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/calculate-date-info", web::get().to(get_date_info));
}
