use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use crate::cache::policy::{self, CacheScope};
use crate::cache::report_cache::mark_served_from_cache;
use crate::cache::ReportCache;
use crate::core::brands::{self, Brand};
use crate::core::calendar;
use crate::core::fiscal::{self, AnalysisMonth, ComparisonWindows};
use crate::core::Result;
use crate::modules::discount_detail::models::DiscountDetailReport;
use crate::warehouse::{Row, WarehouseClient};

const REPORT: &str = "discount-detail";

/// Discount-type sales breakdown for one brand over the analysis month and
/// the comparable prior-year window.
pub struct DiscountDetailService {
    warehouse: Arc<dyn WarehouseClient>,
    cache: ReportCache,
}

impl DiscountDetailService {
    pub fn new(warehouse: Arc<dyn WarehouseClient>, cache: ReportCache) -> Self {
        Self { warehouse, cache }
    }

    pub async fn report(
        &self,
        brand: &Brand,
        month: Option<AnalysisMonth>,
        today: NaiveDate,
        force_update: bool,
    ) -> Result<Value> {
        let asof = fiscal::resolve_asof_date(month, today)?;
        let scope_month = month.unwrap_or_else(|| AnalysisMonth::of(today));

        let dims = BTreeMap::from([("brand", brand.code.to_string())]);
        let cache_key = policy::build_key(
            REPORT,
            &dims,
            &CacheScope::MonthAndDay(scope_month, today),
        );

        if !force_update {
            if let Some(mut cached) = self.cache.fetch(&cache_key).await {
                mark_served_from_cache(&mut cached, &cache_key);
                return Ok(cached);
            }
        }

        let windows = fiscal::compute_comparison_windows(asof);
        let sql = discount_query(brand.code, &windows);
        let mut rows = self.warehouse.execute_query(&sql).await?;
        attach_channel_names(&mut rows);
        info!(brand = brand.code, rows = rows.len(), %asof, "discount detail rows loaded");

        let report = DiscountDetailReport {
            success: true,
            date: calendar::iso_date(today),
            brand_code: brand.code.to_string(),
            analysis_month: scope_month.to_string(),
            asof_dt: calendar::iso_date(asof),
            row_count: rows.len(),
            data: rows,
            cached: false,
        };

        let envelope = serde_json::to_value(&report)?;
        self.cache
            .write(&cache_key, &envelope, policy::ttl_seconds(REPORT))
            .await;
        Ok(envelope)
    }
}

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

fn discount_query(brand_code: &str, windows: &ComparisonWindows) -> String {
    let cy_from = calendar::iso_date(windows.cy.from);
    let cy_to = calendar::iso_date(windows.cy.to);
    let py_from = calendar::iso_date(windows.py.from);
    let py_to = calendar::iso_date(windows.py.to);
    let shops = brands::rf_override_shop_list();

    format!(
        r#"
WITH base AS (
    SELECT
        CASE
            WHEN a.SALE_DT BETWEEN '{cy_from}'::DATE AND '{cy_to}'::DATE THEN 'CY'
            ELSE 'PY'
        END AS gubun,

        a.BRD_CD,
        b.CD_NM,
        e.PRDT_KIND_NM,
        e.ITEM,
        e.ITEM_NM,
        a.PRDT_CD,
        e.PRDT_NM,

        CASE
            WHEN a.BRD_CD = 'M' AND a.SHOP_ID IN ({shops}) THEN 'RF'
            ELSE s.DIST_TYPE_SAP
        END AS channel_cd,

        a.TAG_AMT,
        a.SALE_AMT

    FROM PRCS.DW_SALE a
    JOIN PRCS.DB_SHOP s
      ON a.SHOP_ID = s.SHOP_ID
     AND a.BRD_CD  = s.BRD_CD
     AND s.MNG_TYPE = 'A'
     AND s.ANAL_CNTRY = 'KO'
    JOIN FNF.PRCS.DB_PRDT e
      ON a.PRDT_CD = e.PRDT_CD
    LEFT JOIN PRCS.DW_COMN_CD b
      ON a.DIST_CLS = b.CD
     AND b.PARENT_CD = 'C034'
    WHERE
        a.BRD_CD = '{brand_code}'
        AND (
            a.SALE_DT BETWEEN '{cy_from}'::DATE AND '{cy_to}'::DATE
            OR a.SALE_DT BETWEEN '{py_from}'::DATE AND '{py_to}'::DATE
        )
)
SELECT
    gubun        AS GUBUN,
    BRD_CD,
    CD_NM        AS DISC_TYPE_NM,
    channel_cd   AS CHNL_CD,
    PRDT_KIND_NM,
    ITEM         AS ITEM_CD,
    ITEM_NM,
    PRDT_CD,
    PRDT_NM,
    SUM(TAG_AMT)  AS TAG_SALES,
    SUM(SALE_AMT) AS REAL_SALES
FROM base
GROUP BY
    gubun, BRD_CD, CD_NM, channel_cd,
    PRDT_KIND_NM, ITEM, ITEM_NM, PRDT_CD, PRDT_NM
HAVING SUM(SALE_AMT) <> 0
ORDER BY gubun, CD_NM
"#
    )
}
