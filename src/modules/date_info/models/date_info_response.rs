use chrono::NaiveDate;
use serde::Serialize;

use crate::core::calendar;

/// One Monday-to-Sunday week in the formats the dashboard renders
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekInfo {
    pub start: String,
    pub end: String,
    pub start_formatted: String,
    pub end_formatted: String,
    pub display: String,
}

impl WeekInfo {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: calendar::iso_date(start),
            end: calendar::iso_date(end),
            start_formatted: calendar::dotted_date(start),
            end_formatted: calendar::dotted_date(end),
            display: format!(
                "{} ~ {}",
                calendar::dotted_date(start),
                calendar::dotted_date(end)
            ),
        }
    }
}

/// Response envelope for the calculate-date-info endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateInfoResponse {
    pub success: bool,
    pub update_date: String,
    pub update_date_formatted: String,
    pub week: WeekInfo,
    pub current_month: String,
    pub prev_year_week: WeekInfo,
}
