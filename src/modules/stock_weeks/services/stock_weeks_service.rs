use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use crate::cache::policy::{self, CacheScope};
use crate::cache::report_cache::mark_served_from_cache;
use crate::cache::ReportCache;
use crate::core::calendar;
use crate::core::fiscal;
use crate::core::Result;
use crate::modules::stock_weeks::models::{StockWeeksReport, YearRowCounts, YearRows};
use crate::warehouse::{Row, WarehouseClient};

const REPORT: &str = "stock-weeks";

/// Weeks-of-stock base metrics (7-day and 28-day sales against stock on
/// hand) for the accessory assortment, at the current and the prior-year
/// as-of dates.
pub struct StockWeeksService {
    warehouse: Arc<dyn WarehouseClient>,
    cache: ReportCache,
}

impl StockWeeksService {
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

        let sql = stock_weeks_query(asof, asof_py);
        let rows = self.warehouse.execute_query(&sql).await?;

        let (cy, py) = split_years(rows);
        info!(cy = cy.len(), py = py.len(), %asof, "stock weeks rows loaded");

        let report = StockWeeksReport {
            success: true,
            date: calendar::iso_date(today),
            asof_dt: calendar::iso_date(asof),
            row_count: YearRowCounts {
                cy: cy.len(),
                py: py.len(),
            },
            data: YearRows { cy, py },
            cached: false,
        };

        let envelope = serde_json::to_value(&report)?;
        self.cache
            .write(&cache_key, &envelope, policy::ttl_seconds(REPORT))
            .await;
        Ok(envelope)
    }
}

fn split_years(rows: Vec<Row>) -> (Vec<Row>, Vec<Row>) {
    let mut cy = Vec::new();
    let mut py = Vec::new();
    for row in rows {
        match row.get("YY").and_then(Value::as_str) {
            Some("CY") => cy.push(row),
            Some("PY") => py.push(row),
            _ => {}
        }
    }
    (cy, py)
}

fn stock_weeks_query(asof: NaiveDate, asof_py: NaiveDate) -> String {
    format!(
        r#"
WITH params AS (
    SELECT
        '{asof}'::DATE AS asof_dt,
        '{asof_py}'::DATE AS asof_dt_py
),
prdt AS (
    SELECT
        c.brd_cd, c.prdt_cd,
        MAX(c.prdt_kind_nm) AS prdt_kind_nm,
        MAX(c.item) AS item,
        MAX(c.item_nm) AS item_nm,
        MAX(c.prdt_nm) AS prdt_nm
    FROM fnf.prcs.db_prdt c
    WHERE c.parent_prdt_kind_nm = 'ACC'
    GROUP BY 1,2
),
stock_base AS (
    SELECT
        p.asof_dt, a.brd_cd, a.prdt_cd, 'CY' AS yy,
        SUM(a.stock_qty) AS stock_qty,
        SUM(a.stock_tag_amt) AS stock_tag_amt
    FROM params p
    JOIN fnf.prcs.dw_scs_dacum a ON p.asof_dt BETWEEN a.start_dt AND a.end_dt
    JOIN prdt pr ON a.brd_cd = pr.brd_cd AND a.prdt_cd = pr.prdt_cd
    WHERE a.brd_cd <> 'A'
    GROUP BY 1,2,3,4
    UNION ALL
    SELECT
        p.asof_dt, a.brd_cd, a.prdt_cd, 'PY' AS yy,
        SUM(a.stock_qty) AS stock_qty,
        SUM(a.stock_tag_amt) AS stock_tag_amt
    FROM params p
    JOIN fnf.prcs.dw_scs_dacum a ON p.asof_dt_py BETWEEN a.start_dt AND a.end_dt
    JOIN prdt pr ON a.brd_cd = pr.brd_cd AND a.prdt_cd = pr.prdt_cd
    WHERE a.brd_cd <> 'A'
    GROUP BY 1,2,3,4
),
sale_28d AS (
    SELECT
        p.asof_dt, a.brd_cd, a.prdt_cd, 'CY' AS yy,
        SUM(a.SALE_NML_QTY_CNS + a.SALE_RET_QTY_CNS) AS sale_qty_28d
    FROM params p
    JOIN fnf.prcs.dw_scs_d a ON a.dt BETWEEN DATEADD(day, -27, p.asof_dt) AND p.asof_dt
    WHERE a.brd_cd <> 'A'
    GROUP BY 1,2,3,4
    UNION ALL
    SELECT
        p.asof_dt, a.brd_cd, a.prdt_cd, 'PY' AS yy,
        SUM(a.SALE_NML_QTY_CNS + a.SALE_RET_QTY_CNS) AS sale_qty_28d
    FROM params p
    JOIN fnf.prcs.dw_scs_d a ON a.dt BETWEEN DATEADD(day, -27, p.asof_dt_py) AND p.asof_dt_py
    WHERE a.brd_cd <> 'A'
    GROUP BY 1,2,3,4
),
sale_7d AS (
    SELECT
        p.asof_dt, a.brd_cd, a.prdt_cd, 'CY' AS yy,
        SUM(a.SALE_NML_QTY_CNS + a.SALE_RET_QTY_CNS) AS sale_qty_7d,
        SUM(a.SALE_NML_TAG_AMT_CNS + a.SALE_RET_TAG_AMT_CNS) AS sale_tag_7d
    FROM params p
    JOIN fnf.prcs.dw_scs_d a ON a.dt BETWEEN DATEADD(day, -6, p.asof_dt) AND p.asof_dt
    WHERE a.brd_cd <> 'A'
    GROUP BY 1,2,3,4
    UNION ALL
    SELECT
        p.asof_dt, a.brd_cd, a.prdt_cd, 'PY' AS yy,
        SUM(a.SALE_NML_QTY_CNS + a.SALE_RET_QTY_CNS) AS sale_qty_7d,
        SUM(a.SALE_NML_TAG_AMT_CNS + a.SALE_RET_TAG_AMT_CNS) AS sale_tag_7d
    FROM params p
    JOIN fnf.prcs.dw_scs_d a ON a.dt BETWEEN DATEADD(day, -6, p.asof_dt_py) AND p.asof_dt_py
    WHERE a.brd_cd <> 'A'
    GROUP BY 1,2,3,4
)
SELECT
    st.asof_dt AS ASOF_DT, st.brd_cd AS BRD_CD, st.yy AS YY,
    pr.prdt_kind_nm AS PRDT_KIND_NM, pr.item AS ITEM_CD, pr.item_nm AS ITEM_NM,
    st.prdt_cd AS PRDT_CD, pr.prdt_nm AS PRDT_NM,
    COALESCE(s7.sale_qty_7d, 0) AS SALE_QTY_7D,
    COALESCE(s7.sale_tag_7d, 0) AS SALE_TAG_7D,
    COALESCE(s28.sale_qty_28d, 0) AS SALE_QTY_28D,
    st.stock_qty AS STOCK_QTY, st.stock_tag_amt AS STOCK_TAG_AMT
FROM stock_base st
JOIN prdt pr ON st.brd_cd = pr.brd_cd AND st.prdt_cd = pr.prdt_cd
LEFT JOIN sale_28d s28 ON st.asof_dt = s28.asof_dt AND st.brd_cd = s28.brd_cd
    AND st.prdt_cd = s28.prdt_cd AND st.yy = s28.yy
LEFT JOIN sale_7d s7 ON st.asof_dt = s7.asof_dt AND st.brd_cd = s7.brd_cd
    AND st.prdt_cd = s7.prdt_cd AND st.yy = s7.yy
WHERE st.stock_qty > 0
ORDER BY 1, 2, 3, 13 DESC NULLS LAST
"#,
        asof = calendar::iso_date(asof),
        asof_py = calendar::iso_date(asof_py),
    )
}
