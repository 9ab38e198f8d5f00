use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::core::calendar;
use crate::core::fiscal::AnalysisMonth;

/// Temporal fragment embedded in every cache key. Embedding the calendar day
/// is what invalidates yesterday's entries without an explicit eviction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheScope {
    /// Data moves daily; the key rolls over at reference-timezone midnight.
    Day(NaiveDate),
    /// Data is fixed once the analysis month has closed.
    Month(AnalysisMonth),
    /// Month-scoped report whose current-month rows still move daily. The key
    /// must embed both fragments: the month for data-scope correctness, the
    /// day for daily invalidation.
    MonthAndDay(AnalysisMonth, NaiveDate),
}

impl CacheScope {
    pub fn fragment(&self) -> String {
        match self {
            CacheScope::Day(date) => calendar::compact_date(*date),
            CacheScope::Month(month) => month.compact(),
            CacheScope::MonthAndDay(month, date) => {
                format!("{}-{}", month.compact(), calendar::compact_date(*date))
            }
        }
    }
}

/// Deterministic cache key: report name, dimension values in dimension-key
/// order, then the temporal fragment, hyphen-joined.
pub fn build_key(report: &str, dims: &BTreeMap<&str, String>, scope: &CacheScope) -> String {
    let mut parts = Vec::with_capacity(dims.len() + 2);
    parts.push(report.to_string());
    parts.extend(dims.values().cloned());
    parts.push(scope.fragment());
    parts.join("-")
}

/// Every report type caches for 24 hours; expiry is enforced by the store.
pub fn ttl_seconds(_report: &str) -> u64 {
    86_400
}
