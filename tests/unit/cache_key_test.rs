// Cache-key policy tests
//
// Keys must be pure functions of (report, dimensions, temporal scope):
// identical inputs always give identical keys, dimension insertion order is
// irrelevant, and a different calendar day always gives a different key.
// The day fragment is the only invalidation mechanism in the system.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use salespulse::cache::policy::{build_key, ttl_seconds, CacheScope};
use salespulse::core::fiscal::AnalysisMonth;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn test_key_is_deterministic() {
    let dims = BTreeMap::from([("brand", "M".to_string())]);
    let scope = CacheScope::Day(date(2025, 11, 18));

    let first = build_key("promotion", &dims, &scope);
    let second = build_key("promotion", &dims, &scope);
    assert_eq!(first, second);
    assert_eq!(first, "promotion-M-20251118");
}

#[test]
fn test_key_is_insertion_order_independent() {
    let scope = CacheScope::Day(date(2025, 11, 18));

    let mut forward = BTreeMap::new();
    forward.insert("brand", "M".to_string());
    forward.insert("channel", "01".to_string());

    let mut reversed = BTreeMap::new();
    reversed.insert("channel", "01".to_string());
    reversed.insert("brand", "M".to_string());

    assert_eq!(
        build_key("discount-detail", &forward, &scope),
        build_key("discount-detail", &reversed, &scope)
    );
}

#[test]
fn test_different_days_produce_different_keys() {
    let dims = BTreeMap::new();
    let yesterday = build_key("sales-rate", &dims, &CacheScope::Day(date(2025, 11, 17)));
    let today = build_key("sales-rate", &dims, &CacheScope::Day(date(2025, 11, 18)));
    assert_ne!(yesterday, today);
}

#[test]
fn test_month_and_day_scope_embeds_both_fragments() {
    let month = AnalysisMonth::parse("2025-11").unwrap();
    let key = build_key(
        "sales-composition",
        &BTreeMap::new(),
        &CacheScope::MonthAndDay(month, date(2025, 11, 18)),
    );
    assert_eq!(key, "sales-composition-202511-20251118");

    // same month, next day: the key must change
    let next_day = build_key(
        "sales-composition",
        &BTreeMap::new(),
        &CacheScope::MonthAndDay(month, date(2025, 11, 19)),
    );
    assert_ne!(key, next_day);
}

#[test]
fn test_month_scope_fragment() {
    let month = AnalysisMonth::parse("2024-02").unwrap();
    let key = build_key("sales-composition", &BTreeMap::new(), &CacheScope::Month(month));
    assert_eq!(key, "sales-composition-202402");
}

#[test]
fn test_ttl_is_24_hours_for_every_report() {
    for report in ["sales-rate", "sales-composition", "stock-weeks", "discount-detail", "promotion"] {
        assert_eq!(ttl_seconds(report), 86_400);
    }
}

proptest! {
    #[test]
    fn test_key_purity_under_dim_shuffling(
        dims in prop::collection::btree_map("[a-z]{1,8}", "[A-Za-z0-9]{1,8}", 0..5),
        rotate in 0usize..5usize,
    ) {
        let scope = CacheScope::Day(date(2025, 11, 18));

        let forward: BTreeMap<&str, String> = dims
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();

        // re-insert the same pairs starting from a different position
        let mut pairs: Vec<_> = dims.iter().collect();
        if !pairs.is_empty() {
            let len = pairs.len();
            pairs.rotate_left(rotate % len);
        }
        let shuffled: BTreeMap<&str, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();

        prop_assert_eq!(
            build_key("report", &forward, &scope),
            build_key("report", &shuffled, &scope)
        );
    }

    #[test]
    fn test_key_shape(offset in 0i64..10_000i64) {
        let day = date(2000, 1, 1) + Duration::days(offset);
        let key = build_key("sales-rate", &BTreeMap::new(), &CacheScope::Day(day));

        prop_assert!(key.starts_with("sales-rate-"));
        prop_assert_eq!(key.len(), "sales-rate-".len() + 8);
    }
}
