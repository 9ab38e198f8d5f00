use serde::Serialize;

use crate::warehouse::Row;

/// Weeks-of-stock rows for the current and prior-year as-of dates
#[derive(Debug, Serialize)]
pub struct YearRows {
    #[serde(rename = "CY")]
    pub cy: Vec<Row>,
    #[serde(rename = "PY")]
    pub py: Vec<Row>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct YearRowCounts {
    #[serde(rename = "CY")]
    pub cy: usize,
    #[serde(rename = "PY")]
    pub py: usize,
}

/// Response envelope for the stock-weeks endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockWeeksReport {
    pub success: bool,
    pub date: String,
    #[serde(rename = "asof_dt")]
    pub asof_dt: String,
    pub data: YearRows,
    pub row_count: YearRowCounts,
    pub cached: bool,
}
