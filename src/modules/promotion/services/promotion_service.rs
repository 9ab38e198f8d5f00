use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use crate::cache::policy::{self, CacheScope};
use crate::cache::report_cache::mark_served_from_cache;
use crate::cache::ReportCache;
use crate::core::brands::Brand;
use crate::core::calendar;
use crate::core::fiscal;
use crate::core::Result;
use crate::modules::promotion::models::PromotionReport;
use crate::warehouse::WarehouseClient;

const REPORT: &str = "promotion";

/// Promotion price list for one brand, covering the first day of the month
/// two months back through today.
pub struct PromotionService {
    warehouse: Arc<dyn WarehouseClient>,
    cache: ReportCache,
}

impl PromotionService {
    pub fn new(warehouse: Arc<dyn WarehouseClient>, cache: ReportCache) -> Self {
        Self { warehouse, cache }
    }

    pub async fn report(
        &self,
        brand: &Brand,
        today: NaiveDate,
        force_update: bool,
    ) -> Result<Value> {
        let dims = BTreeMap::from([("brand", brand.code.to_string())]);
        let cache_key = policy::build_key(REPORT, &dims, &CacheScope::Day(today));

        if !force_update {
            if let Some(mut cached) = self.cache.fetch(&cache_key).await {
                mark_served_from_cache(&mut cached, &cache_key);
                return Ok(cached);
            }
        }

        let window_from = fiscal::first_day_months_back(today, 2);
        let sql = promotion_query(brand.code, window_from, today);
        let rows = self.warehouse.execute_query(&sql).await?;
        info!(brand = brand.code, rows = rows.len(), "promotion rows loaded");

        let report = PromotionReport {
            success: true,
            date: calendar::iso_date(today),
            brand_code: brand.code.to_string(),
            window_from: calendar::iso_date(window_from),
            window_to: calendar::iso_date(today),
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

fn promotion_query(brand_code: &str, window_from: NaiveDate, window_to: NaiveDate) -> String {
    format!(
        r#"
SELECT DISTINCT
    b.brd_cd AS BRD_CD,
    a.sale_dt_fr AS SALE_DT_FR,
    a.rmk AS RMK,
    a.disc_clsby_nm AS DISC_RATE_NM,
    b.prdt_kind_nm AS PRDT_KIND_NM,
    b.item AS ITEM_CD,
    b.item_nm AS ITEM_NM,
    a.prdt_cd AS PRDT_CD,
    b.prdt_nm AS PRDT_NM,
    a.flat_price AS TAG_PRICE,
    a.sale_price AS SALE_PRICE
FROM FNF.PRCS.DW_PRICE a
JOIN FNF.PRCS.DB_PRDT b
  ON a.prdt_cd = b.prdt_cd
WHERE a.sale_dt_fr BETWEEN '{window_from}'::DATE AND '{window_to}'::DATE
  AND b.brd_cd = '{brand_code}'
ORDER BY a.sale_dt_fr DESC, a.prdt_cd
"#,
        window_from = calendar::iso_date(window_from),
        window_to = calendar::iso_date(window_to),
    )
}
