use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use crate::cache::policy::{self, CacheScope};
use crate::cache::report_cache::mark_served_from_cache;
use crate::cache::ReportCache;
use crate::core::brands;
use crate::core::calendar;
use crate::core::fiscal::{self, AnalysisMonth, AnalysisPeriod, ComparisonWindows};
use crate::core::Result;
use crate::modules::sales_composition::models::{
    SalesCompositionReport, YearRowCounts, YearRows,
};
use crate::warehouse::{Row, WarehouseClient};

const REPORT: &str = "sales-composition";

/// Month-to-date TAG and net sales by brand, channel and category, compared
/// against the same window one year earlier.
pub struct SalesCompositionService {
    warehouse: Arc<dyn WarehouseClient>,
    cache: ReportCache,
}

impl SalesCompositionService {
    pub fn new(warehouse: Arc<dyn WarehouseClient>, cache: ReportCache) -> Self {
        Self { warehouse, cache }
    }

    pub async fn report(
        &self,
        month: Option<AnalysisMonth>,
        today: NaiveDate,
        force_update: bool,
    ) -> Result<Value> {
        // Validate the month before touching the cache so a future month
        // fails fast instead of poisoning a key.
        let asof = fiscal::resolve_asof_date(month, today)?;
        let scope_month = month.unwrap_or_else(|| AnalysisMonth::of(today));

        let cache_key = policy::build_key(
            REPORT,
            &BTreeMap::new(),
            &CacheScope::MonthAndDay(scope_month, today),
        );

        if !force_update {
            if let Some(mut cached) = self.cache.fetch(&cache_key).await {
                mark_served_from_cache(&mut cached, &cache_key);
                return Ok(cached);
            }
        }

        let windows = fiscal::compute_comparison_windows(asof);
        let sql = composition_query(&windows);
        let mut rows = self.warehouse.execute_query(&sql).await?;
        attach_channel_names(&mut rows);

        let (cy, py) = split_years(rows);
        info!(cy = cy.len(), py = py.len(), %asof, "sales composition rows loaded");

        let report = SalesCompositionReport {
            success: true,
            date: calendar::iso_date(today),
            asof_dt: calendar::iso_date(asof),
            analysis_month: scope_month.to_string(),
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
        match row.get("GUBUN").and_then(Value::as_str) {
            Some("CY") => cy.push(row),
            Some("PY") => py.push(row),
            _ => {}
        }
    }
    (cy, py)
}

/// Channel display names are resolved in Rust so the lookup table lives in
/// one place instead of every query.
fn attach_channel_names(rows: &mut [Row]) {
    for row in rows.iter_mut() {
        let name = row
            .get("CHNL_CD")
            .and_then(Value::as_str)
            .map(brands::channel_display_name)
            .unwrap_or("기타");
        row.insert("CHNL_NM".to_string(), Value::String(name.to_string()));
    }
}

fn period_line(period: &AnalysisPeriod, label: &str) -> String {
    let season = fiscal::resolve_season_code(period.to);
    format!(
        "SELECT '{label}' AS gubun, '{from}'::DATE AS dt_from, '{to}'::DATE AS dt_to, '{yy}' AS cur_yy, '{code}' AS cur_code",
        from = calendar::iso_date(period.from),
        to = calendar::iso_date(period.to),
        yy = season.yy(),
        code = season.half.letter(),
    )
}

fn composition_query(windows: &ComparisonWindows) -> String {
    let cy = period_line(&windows.cy, "CY");
    let py = period_line(&windows.py, "PY");
    let rf_case = format!(
        "CASE WHEN a.BRD_CD = 'M' AND a.SHOP_ID IN ({shops}) THEN 'RF' ELSE sh.DIST_TYPE_SAP END",
        shops = brands::rf_override_shop_list()
    );

    format!(
        r#"
WITH periods AS (
    {cy}
    UNION ALL
    {py}
),
shop_flt AS (
    SELECT BRD_CD, SHOP_ID, DIST_TYPE_SAP, SALE_TYPE_SAP
    FROM FNF.PRCS.DB_SHOP
    WHERE ANAL_CNTRY = 'KO'
      AND DIST_TYPE_SAP <> '09'
),
dw_agg AS (
    SELECT
        p.gubun, p.cur_yy, p.cur_code,
        a.BRD_CD, a.PRDT_CD, a.SESN,
        {rf_case} AS CHNL_CD,
        SUM(
            CASE WHEN {rf_case} IN ('08','99')
                THEN (a.DELV_NML_TAG_AMT + a.DELV_RET_TAG_AMT)
                ELSE (a.SALE_NML_TAG_AMT + a.SALE_RET_TAG_AMT)
            END
        ) AS TAG_SALES,
        SUM(
            CASE WHEN {rf_case} IN ('08','99') AND sh.SALE_TYPE_SAP IN ('Z001','Z003')
                THEN (a.DELV_NML_SUPP_AMT + a.DELV_RET_SUPP_AMT) * 1.1
            WHEN {rf_case} IN ('08','99')
                THEN 0
            ELSE (a.SALE_NML_SALE_AMT + a.SALE_RET_SALE_AMT)
            END
        ) AS REAL_SALES
    FROM periods p
    JOIN FNF.PRCS.DW_SH_SCS_D a ON a.DT BETWEEN p.dt_from AND p.dt_to
    JOIN shop_flt sh ON a.BRD_CD = sh.BRD_CD AND a.SHOP_ID = sh.SHOP_ID
    WHERE a.BRD_CD <> 'A'
    GROUP BY p.gubun, p.cur_yy, p.cur_code, a.BRD_CD, a.PRDT_CD, a.SESN, {rf_case}
)
SELECT
    d.gubun AS GUBUN,
    d.BRD_CD,
    d.CHNL_CD,
    CASE
        WHEN b.PARENT_PRDT_KIND_NM = 'ACC' THEN
            CASE b.PRDT_KIND_NM
                WHEN 'Bag'      THEN '가방'
                WHEN 'Shoes'    THEN '신발'
                WHEN 'Headwear' THEN '모자'
                WHEN 'Acc_etc'  THEN '기타ACC'
                ELSE b.PRDT_KIND_NM
            END
        ELSE
            CASE
                WHEN SUBSTR(d.SESN, 1, 3) LIKE '%N%' THEN
                    CASE
                        WHEN SUBSTR(d.SESN, 1, 2) = d.cur_yy THEN '당시즌의류'
                        ELSE '과시즌의류'
                    END
                ELSE
                    CASE
                        WHEN SUBSTR(d.SESN, 1, 2) = d.cur_yy
                         AND RIGHT(d.SESN, 1) = d.cur_code
                            THEN '당시즌의류'
                        WHEN SUBSTR(d.SESN, 1, 2) = d.cur_yy
                            THEN '차시즌의류'
                        ELSE '과시즌의류'
                    END
            END
    END AS CATEGORY,
    b.ITEM_NM,
    SUM(d.TAG_SALES)  AS TAG_SALES,
    SUM(d.REAL_SALES) AS REAL_SALES
FROM dw_agg d
JOIN FNF.PRCS.DB_PRDT b
  ON d.BRD_CD  = b.BRD_CD
 AND d.PRDT_CD = b.PRDT_CD
GROUP BY
    d.gubun, d.BRD_CD, d.CHNL_CD, b.ITEM_NM,
    b.PARENT_PRDT_KIND_NM, b.PRDT_KIND_NM, d.SESN, d.cur_yy, d.cur_code
HAVING (SUM(d.TAG_SALES) + SUM(d.REAL_SALES)) <> 0
"#
    )
}
