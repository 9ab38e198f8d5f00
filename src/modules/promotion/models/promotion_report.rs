use serde::Serialize;

use crate::warehouse::Row;

/// Response envelope for the promotion endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionReport {
    pub success: bool,
    pub date: String,
    pub brand_code: String,
    pub window_from: String,
    pub window_to: String,
    pub data: Vec<Row>,
    pub row_count: usize,
    pub cached: bool,
}
