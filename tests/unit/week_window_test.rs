// Week-window tests
//
// The weekly update feed lands on the Monday after the report week; the
// calculator must always return the preceding Monday-to-Sunday window and a
// prior-year week exactly 364 days earlier (weekday-aligned, never a
// calendar-year shift).

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use proptest::prelude::*;
use salespulse::core::fiscal::resolve_week_window;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn test_monday_update_date() {
    let week = resolve_week_window(date(2025, 11, 17));
    assert_eq!(week.week_start, date(2025, 11, 10));
    assert_eq!(week.week_end, date(2025, 11, 16));
}

#[test]
fn test_all_seven_weekdays_resolve_to_the_same_week() {
    // Sunday 2025-11-16 through Saturday 2025-11-22 all precede or follow the
    // 2025-11-10 report week closely enough to resolve to it
    for offset in 0..7 {
        let update_date = date(2025, 11, 16) + Duration::days(offset);
        let week = resolve_week_window(update_date);
        assert_eq!(week.week_start, date(2025, 11, 10), "input {update_date}");
        assert_eq!(week.week_end, date(2025, 11, 16), "input {update_date}");
    }
}

#[test]
fn test_prior_year_week_is_364_days_back() {
    let week = resolve_week_window(date(2025, 11, 17));
    assert_eq!(week.prior_year_start, date(2024, 11, 11));
    assert_eq!(week.prior_year_end, date(2024, 11, 17));
    // same weekday, not the same calendar date
    assert_eq!(week.prior_year_start.weekday(), Weekday::Mon);
    assert_ne!(week.prior_year_start, date(2024, 11, 10));
}

proptest! {
    #[test]
    fn test_week_always_monday_through_sunday(offset in 0i64..20_000i64) {
        let update_date = date(1990, 1, 1) + Duration::days(offset);
        let week = resolve_week_window(update_date);

        prop_assert_eq!(week.week_start.weekday(), Weekday::Mon);
        prop_assert_eq!(week.week_end.weekday(), Weekday::Sun);
        prop_assert_eq!(week.week_end - week.week_start, Duration::days(6));
    }

    #[test]
    fn test_prior_year_shift_is_exactly_52_weeks(offset in 0i64..20_000i64) {
        let update_date = date(1990, 1, 1) + Duration::days(offset);
        let week = resolve_week_window(update_date);

        prop_assert_eq!(week.week_start - week.prior_year_start, Duration::days(364));
        prop_assert_eq!(week.week_end - week.prior_year_end, Duration::days(364));
        prop_assert_eq!(week.prior_year_start.weekday(), Weekday::Mon);
    }

    #[test]
    fn test_week_precedes_update_date(offset in 0i64..20_000i64) {
        let update_date = date(1990, 1, 1) + Duration::days(offset);
        let week = resolve_week_window(update_date);

        prop_assert!(week.week_start < update_date);
        prop_assert!(week.week_end <= update_date);
    }
}
