// As-of date resolution and comparison-window tests
//
// The as-of date is the latest fully-closed warehouse day for the requested
// analysis month. These tests pin the behavior at month, year and leap-day
// boundaries, which the dashboards depend on for year-over-year comparisons.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use salespulse::core::fiscal::{
    compute_comparison_windows, resolve_asof_date, shift_calendar_years, AnalysisMonth,
};
use salespulse::core::AppError;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn month(value: &str) -> AnalysisMonth {
    AnalysisMonth::parse(value).unwrap()
}

#[test]
fn test_past_month_returns_last_calendar_day() {
    let today = date(2025, 11, 18);
    assert_eq!(
        resolve_asof_date(Some(month("2025-02")), today).unwrap(),
        date(2025, 2, 28)
    );
    // leap year honored
    assert_eq!(
        resolve_asof_date(Some(month("2024-02")), today).unwrap(),
        date(2024, 2, 29)
    );
    assert_eq!(
        resolve_asof_date(Some(month("2025-10")), today).unwrap(),
        date(2025, 10, 31)
    );
}

#[test]
fn test_current_month_returns_yesterday() {
    assert_eq!(
        resolve_asof_date(Some(month("2025-11")), date(2025, 11, 18)).unwrap(),
        date(2025, 11, 17)
    );
}

#[test]
fn test_month_boundary_on_new_years_day() {
    let today = date(2026, 1, 1);
    // the just-closed month resolves to its full last day, not one short
    assert_eq!(
        resolve_asof_date(Some(month("2025-12")), today).unwrap(),
        date(2025, 12, 31)
    );
    // the current month has no closed day yet except yesterday
    assert_eq!(
        resolve_asof_date(Some(month("2026-01")), today).unwrap(),
        date(2025, 12, 31)
    );
}

#[test]
fn test_absent_month_returns_yesterday() {
    assert_eq!(
        resolve_asof_date(None, date(2025, 3, 1)).unwrap(),
        date(2025, 2, 28)
    );
}

#[test]
fn test_future_month_is_rejected() {
    let err = resolve_asof_date(Some(month("2026-02")), date(2026, 1, 15)).unwrap_err();
    assert!(matches!(err, AppError::InvalidPeriod(_)));
}

#[test]
fn test_malformed_month_is_rejected() {
    for input in ["2025-13", "202511", "2025-1", "25-11", "november"] {
        assert!(AnalysisMonth::parse(input).is_err(), "'{input}' parsed");
    }
}

#[test]
fn test_comparison_windows_on_leap_day() {
    let windows = compute_comparison_windows(date(2024, 2, 29));
    assert_eq!(windows.cy.from, date(2024, 2, 1));
    assert_eq!(windows.cy.to, date(2024, 2, 29));
    // exact calendar-year shift with the leap day clamped
    assert_eq!(windows.py.from, date(2023, 2, 1));
    assert_eq!(windows.py.to, date(2023, 2, 28));
    assert_eq!(windows.py_end.to, date(2023, 2, 28));
}

#[test]
fn test_py_end_is_a_fixed_snapshot() {
    let windows = compute_comparison_windows(date(2025, 7, 15));
    assert_eq!(windows.py_end.from, date(2024, 2, 28));
    assert_eq!(windows.py_end.to, date(2024, 2, 28));

    // independent of the as-of day value
    let other = compute_comparison_windows(date(2025, 7, 3));
    assert_eq!(other.py_end.to, date(2024, 2, 28));
}

proptest! {
    #[test]
    fn test_py_window_is_calendar_year_shift(offset in 0i64..20_000i64) {
        let asof = date(1990, 1, 1) + chrono::Duration::days(offset);
        let windows = compute_comparison_windows(asof);

        prop_assert_eq!(windows.py.from, shift_calendar_years(windows.cy.from, -1));
        prop_assert_eq!(windows.py.to, shift_calendar_years(windows.cy.to, -1));
    }

    #[test]
    fn test_window_invariants(offset in 0i64..20_000i64) {
        let asof = date(1990, 1, 1) + chrono::Duration::days(offset);
        let windows = compute_comparison_windows(asof);

        prop_assert!(windows.cy.from <= windows.cy.to);
        prop_assert!(windows.py.from <= windows.py.to);
        prop_assert!(windows.py_end.from <= windows.py_end.to);
        prop_assert_eq!(windows.cy.from.day(), 1);
        prop_assert_eq!(windows.cy.to, asof);
    }

    #[test]
    fn test_past_month_asof_closes_the_month(offset in 0i64..20_000i64, back in 1u32..120u32) {
        let today = date(2000, 6, 15) + chrono::Duration::days(offset);
        let target = salespulse::core::fiscal::first_day_months_back(today, back);
        let target_month = AnalysisMonth::of(target);

        let asof = resolve_asof_date(Some(target_month), today).unwrap();
        prop_assert_eq!(asof.year(), target.year());
        prop_assert_eq!(asof.month(), target.month());
        // the day after the as-of date is the first of the next month
        prop_assert_eq!((asof + chrono::Duration::days(1)).day(), 1);
    }
}
