use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::warehouse::Row;

/// As-of dates for the three compared periods
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodInfo {
    pub cur_date: String,
    pub py_date: String,
    pub py_end_date: String,
}

/// Season-to-date rows split by comparison period
#[derive(Debug, Serialize)]
pub struct PeriodRows {
    #[serde(rename = "CUR")]
    pub cur: Vec<Row>,
    #[serde(rename = "PY")]
    pub py: Vec<Row>,
    #[serde(rename = "PY_END")]
    pub py_end: Vec<Row>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PeriodRowCounts {
    #[serde(rename = "CUR")]
    pub cur: usize,
    #[serde(rename = "PY")]
    pub py: usize,
    #[serde(rename = "PY_END")]
    pub py_end: usize,
}

/// Tag-amount totals for one period. Warehouse numerics arrive as strings
/// through the SQL API, so sums are carried as decimals, not floats.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SalesTotals {
    pub order_tag_amt: Decimal,
    pub store_tag_amt: Decimal,
    pub sale_tag_amt: Decimal,
    pub stock_tag_amt: Decimal,
}

impl SalesTotals {
    pub fn from_rows(rows: &[Row]) -> Self {
        Self {
            order_tag_amt: sum_column(rows, "AC_ORD_TAG_AMT_KOR"),
            store_tag_amt: sum_column(rows, "AC_STOR_TAG_AMT_KOR"),
            sale_tag_amt: sum_column(rows, "SALE_TAG"),
            stock_tag_amt: sum_column(rows, "STOCK_TAG_AMT"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PeriodTotals {
    #[serde(rename = "CUR")]
    pub cur: SalesTotals,
    #[serde(rename = "PY")]
    pub py: SalesTotals,
    #[serde(rename = "PY_END")]
    pub py_end: SalesTotals,
}

/// Response envelope for the sales-rate endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRateReport {
    pub success: bool,
    pub date: String,
    pub period_info: PeriodInfo,
    pub data: PeriodRows,
    pub row_count: PeriodRowCounts,
    pub totals: PeriodTotals,
    pub cached: bool,
}

fn sum_column(rows: &[Row], column: &str) -> Decimal {
    rows.iter()
        .filter_map(|row| row.get(column))
        .filter_map(decimal_value)
        .sum()
}

fn decimal_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}
