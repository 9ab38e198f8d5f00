use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use crate::cache::policy::{self, CacheScope};
use crate::cache::report_cache::mark_served_from_cache;
use crate::cache::ReportCache;
use crate::core::calendar;
use crate::core::fiscal::{self, SeasonCode};
use crate::core::Result;
use crate::modules::sales_rate::models::{
    PeriodInfo, PeriodRowCounts, PeriodRows, PeriodTotals, SalesRateReport, SalesTotals,
};
use crate::warehouse::{Row, WarehouseClient};

const REPORT: &str = "sales-rate";

/// Season-to-date sell-through report over the season cumulative fact table,
/// compared across the current season, the prior-year season and the prior
/// year-end snapshot.
pub struct SalesRateService {
    warehouse: Arc<dyn WarehouseClient>,
    cache: ReportCache,
}

impl SalesRateService {
    pub fn new(warehouse: Arc<dyn WarehouseClient>, cache: ReportCache) -> Self {
        Self { warehouse, cache }
    }

    pub async fn report(&self, today: NaiveDate, force_update: bool) -> Result<Value> {
        let cache_key = policy::build_key(REPORT, &BTreeMap::new(), &CacheScope::Day(today));

        if !force_update {
            if let Some(mut cached) = self.cache.fetch(&cache_key).await {
                mark_served_from_cache(&mut cached, &cache_key);
                return Ok(cached);
            }
        }

        let asof = fiscal::resolve_asof_date(None, today)?;
        let asof_py = fiscal::shift_calendar_years(asof, -1);
        let py_end = fiscal::compute_comparison_windows(asof).py_end.to;
        let cur_season = fiscal::resolve_season_code(asof);
        let py_season = cur_season.prior_year();

        let sql = season_sales_query(asof, asof_py, py_end, &cur_season, &py_season);
        let rows = self.warehouse.execute_query(&sql).await?;

        let (cur, py, py_end_rows) = split_periods(rows);
        info!(
            cur = cur.len(),
            py = py.len(),
            py_end = py_end_rows.len(),
            "sales rate rows loaded"
        );

        let report = SalesRateReport {
            success: true,
            date: calendar::iso_date(today),
            period_info: PeriodInfo {
                cur_date: calendar::iso_date(asof),
                py_date: calendar::iso_date(asof_py),
                py_end_date: calendar::iso_date(py_end),
            },
            row_count: PeriodRowCounts {
                cur: cur.len(),
                py: py.len(),
                py_end: py_end_rows.len(),
            },
            totals: PeriodTotals {
                cur: SalesTotals::from_rows(&cur),
                py: SalesTotals::from_rows(&py),
                py_end: SalesTotals::from_rows(&py_end_rows),
            },
            data: PeriodRows {
                cur,
                py,
                py_end: py_end_rows,
            },
            cached: false,
        };

        let envelope = serde_json::to_value(&report)?;
        self.cache
            .write(&cache_key, &envelope, policy::ttl_seconds(REPORT))
            .await;
        Ok(envelope)
    }
}

fn split_periods(rows: Vec<Row>) -> (Vec<Row>, Vec<Row>, Vec<Row>) {
    let mut cur = Vec::new();
    let mut py = Vec::new();
    let mut py_end = Vec::new();
    for row in rows {
        match row.get("PERIOD_GB").and_then(Value::as_str) {
            Some("CUR") => cur.push(row),
            Some("PY") => py.push(row),
            Some("PY_END") => py_end.push(row),
            _ => {}
        }
    }
    (cur, py, py_end)
}

/// One UNION branch of the season cumulative scan, pinned to a period label,
/// an as-of day and a season code.
fn season_branch(period: &str, asof: NaiveDate, season: &SeasonCode) -> String {
    let asof = calendar::iso_date(asof);
    format!(
        r#"  SELECT
      '{asof}'::DATE AS ASOF_DT, '{period}' AS PERIOD_GB, a.BRD_CD, a.SESN AS SESN, a.PRDT_CD,
      b.PRDT_KIND_NM, b.ITEM AS ITEM_CD, b.ITEM_NM, b.PRDT_NM,
      a.AC_ORD_QTY_KOR, a.AC_ORD_TAG_AMT_KOR, a.AC_STOR_QTY_KOR, a.AC_STOR_TAG_AMT_KOR,
      (a.AC_SALE_NML_QTY_CNS + a.AC_SALE_RET_QTY_CNS) AS SALE_QTY,
      (a.AC_SALE_NML_TAG_AMT_CNS + a.AC_SALE_RET_TAG_AMT_CNS) AS SALE_TAG,
      a.STOCK_QTY, a.STOCK_TAG_AMT
  FROM FNF.PRCS.DW_SCS_DACUM a
  JOIN PRCS.DB_PRDT b ON a.PRDT_CD = b.PRDT_CD
  WHERE a.SESN = '{season}' AND a.BRD_CD <> 'A' AND b.PARENT_PRDT_KIND_NM = '의류'
    AND '{asof}'::DATE BETWEEN a.START_DT AND a.END_DT"#
    )
}

fn season_sales_query(
    asof: NaiveDate,
    asof_py: NaiveDate,
    py_end: NaiveDate,
    cur_season: &SeasonCode,
    py_season: &SeasonCode,
) -> String {
    let branches = [
        season_branch("CUR", asof, cur_season),
        season_branch("PY", asof_py, py_season),
        season_branch("PY_END", py_end, py_season),
    ]
    .join("\n\n  UNION ALL\n\n");

    format!(
        r#"
WITH BASE AS (
{branches}
)
SELECT
    ASOF_DT, PERIOD_GB, BRD_CD, MAX(SESN) AS SESN, PRDT_CD,
    MAX(PRDT_KIND_NM) AS PRDT_KIND_NM, MAX(ITEM_CD) AS ITEM_CD,
    MAX(ITEM_NM) AS ITEM_NM, MAX(PRDT_NM) AS PRDT_NM,
    SUM(AC_ORD_QTY_KOR) AS AC_ORD_QTY_KOR,
    SUM(AC_ORD_TAG_AMT_KOR) AS AC_ORD_TAG_AMT_KOR,
    SUM(AC_STOR_QTY_KOR) AS AC_STOR_QTY_KOR,
    SUM(AC_STOR_TAG_AMT_KOR) AS AC_STOR_TAG_AMT_KOR,
    SUM(SALE_QTY) AS SALE_QTY, SUM(SALE_TAG) AS SALE_TAG,
    SUM(STOCK_QTY) AS STOCK_QTY, SUM(STOCK_TAG_AMT) AS STOCK_TAG_AMT
FROM BASE
GROUP BY ASOF_DT, PERIOD_GB, BRD_CD, PRDT_CD
HAVING COALESCE(SUM(AC_ORD_TAG_AMT_KOR), 0) + COALESCE(SUM(AC_STOR_TAG_AMT_KOR), 0)
     + COALESCE(SUM(SALE_TAG), 0) + COALESCE(SUM(STOCK_TAG_AMT), 0) <> 0
ORDER BY BRD_CD, PRDT_CD, PERIOD_GB, ASOF_DT
"#
    )
}
