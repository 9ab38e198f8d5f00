use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::core::{AppError, Result};

/// Reference timezone for every "today" decision in the service (KST, UTC+9).
/// Warehouse data is loaded on Korean calendar days, so the calendar date in
/// this offset is the only definition of "today" the reports may use.
pub const REFERENCE_OFFSET_HOURS: i32 = 9;

fn reference_offset() -> FixedOffset {
    FixedOffset::east_opt(REFERENCE_OFFSET_HOURS * 3600).expect("valid offset")
}

/// Calendar date in the reference timezone for a given UTC instant.
pub fn reference_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&reference_offset()).date_naive()
}

/// Current calendar date in the reference timezone.
pub fn today() -> NaiveDate {
    reference_date(Utc::now())
}

/// `YYYY-MM-DD`
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `YYYYMMDD`, used in cache keys and query parameters.
pub fn compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// `YYYY.MM.DD`, the dashboard display variant.
pub fn dotted_date(date: NaiveDate) -> String {
    date.format("%Y.%m.%d").to_string()
}

/// Strict `YYYYMMDD` parse for the `date` query parameter.
pub fn parse_compact_date(value: &str) -> Result<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::invalid_period(format!(
            "expected YYYYMMDD date, got '{value}'"
        )));
    }
    NaiveDate::parse_from_str(value, "%Y%m%d")
        .map_err(|_| AppError::invalid_period(format!("'{value}' is not a calendar date")))
}
