use serde::Serialize;

use crate::warehouse::Row;

/// Response envelope for the discount-detail endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountDetailReport {
    pub success: bool,
    pub date: String,
    pub brand_code: String,
    pub analysis_month: String,
    #[serde(rename = "asof_dt")]
    pub asof_dt: String,
    pub data: Vec<Row>,
    pub row_count: usize,
    pub cached: bool,
}
