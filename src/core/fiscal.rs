use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

use crate::core::{AppError, Result};

/// Analysis month supplied by the dashboard as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AnalysisMonth {
    year: i32,
    month: u32,
}

impl AnalysisMonth {
    /// Strict `YYYY-MM` parse. Anything else is an invalid period; callers
    /// must not silently default.
    pub fn parse(value: &str) -> Result<Self> {
        let parsed = value.split_once('-').and_then(|(year, month)| {
            if year.len() != 4
                || month.len() != 2
                || !year.bytes().all(|b| b.is_ascii_digit())
                || !month.bytes().all(|b| b.is_ascii_digit())
            {
                return None;
            }
            Some((year.parse::<i32>().ok()?, month.parse::<u32>().ok()?))
        });

        let (year, month) = parsed.ok_or_else(|| {
            AppError::invalid_period(format!("expected YYYY-MM month, got '{value}'"))
        })?;

        if !(1..=12).contains(&month) {
            return Err(AppError::invalid_period(format!(
                "month {month} out of range in '{value}'"
            )));
        }

        Ok(Self { year, month })
    }

    /// The month a calendar date falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("validated month")
    }

    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("validated month")
            - Duration::days(1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// `YYYYMM`, the cache-key fragment for month-scoped reports.
    pub fn compact(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }
}

impl fmt::Display for AnalysisMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// As-of date: the latest calendar day with complete warehouse data for the
/// requested month.
///
/// - no month: yesterday
/// - current month: yesterday (also across month/year boundaries)
/// - past month: last calendar day of that month
/// - future month: invalid period
pub fn resolve_asof_date(month: Option<AnalysisMonth>, today: NaiveDate) -> Result<NaiveDate> {
    let Some(month) = month else {
        return Ok(today - Duration::days(1));
    };

    if month.contains(today) {
        return Ok(today - Duration::days(1));
    }

    if month.first_day() > today {
        return Err(AppError::invalid_period(format!(
            "analysis month {month} is in the future"
        )));
    }

    Ok(month.last_day())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodLabel {
    Cy,
    Py,
    PyEnd,
}

/// One dated reporting window, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisPeriod {
    pub label: PeriodLabel,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl AnalysisPeriod {
    fn new(label: PeriodLabel, from: NaiveDate, to: NaiveDate) -> Self {
        debug_assert!(from <= to);
        Self { label, from, to }
    }
}

/// Current-year window, prior-year comparable window and prior-year-end
/// snapshot for year-over-year comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonWindows {
    pub cy: AnalysisPeriod,
    pub py: AnalysisPeriod,
    pub py_end: AnalysisPeriod,
}

/// Shift by whole calendar years. Feb 29 clamps to Feb 28 when the target
/// year is not a leap year.
pub fn shift_calendar_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 2, 28).expect("clamped leap day"))
}

/// CY is month-to-date up to the as-of day; PY is the same window shifted by
/// exactly one calendar year; PY_END is the prior fiscal year's closing day
/// (Feb 28), a single-day snapshot independent of the as-of day value.
pub fn compute_comparison_windows(asof: NaiveDate) -> ComparisonWindows {
    let month_start = NaiveDate::from_ymd_opt(asof.year(), asof.month(), 1).expect("first of month");

    let cy = AnalysisPeriod::new(PeriodLabel::Cy, month_start, asof);
    let py = AnalysisPeriod::new(
        PeriodLabel::Py,
        shift_calendar_years(month_start, -1),
        shift_calendar_years(asof, -1),
    );

    let fiscal_close = NaiveDate::from_ymd_opt(asof.year() - 1, 2, 28).expect("fiscal close");
    let py_end = AnalysisPeriod::new(PeriodLabel::PyEnd, fiscal_close, fiscal_close);

    ComparisonWindows { cy, py, py_end }
}

/// First calendar day of the month a number of months before the given date.
/// Used for rolling lookback windows such as the promotion price list.
pub fn first_day_months_back(date: NaiveDate, months: u32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 - months as i32;
    let year = total.div_euclid(12);
    let month0 = total.rem_euclid(12) as u32;
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).expect("valid month arithmetic")
}

/// Monday-to-Sunday report week preceding a weekly update date, plus the
/// comparable week exactly 52 weeks (364 days) earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWeek {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub prior_year_start: NaiveDate,
    pub prior_year_end: NaiveDate,
}

/// The update date is the Monday after the report week; the window returned
/// is the previous Monday through Sunday.
pub fn resolve_week_window(update_date: NaiveDate) -> ReportWeek {
    // 0=Sunday .. 6=Saturday, the update feed's day numbering
    let day_of_week = update_date.weekday().num_days_from_sunday();
    let days_back = match day_of_week {
        1 => 7,
        0 => 6,
        n => (n - 1) + 7,
    };

    let week_start = update_date - Duration::days(i64::from(days_back));
    let week_end = week_start + Duration::days(6);

    if week_start.weekday() != Weekday::Mon {
        tracing::warn!(week_start = %week_start, "report week does not start on a Monday");
    }

    // 364-day shift keeps the weekday alignment; a calendar-year shift would not.
    ReportWeek {
        week_start,
        week_end,
        prior_year_start: week_start - Duration::days(364),
        prior_year_end: week_end - Duration::days(364),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonHalf {
    Spring,
    Fall,
}

impl SeasonHalf {
    pub fn letter(&self) -> char {
        match self {
            SeasonHalf::Spring => 'S',
            SeasonHalf::Fall => 'F',
        }
    }
}

/// Merchandise season label, rendered as e.g. `25F` / `26S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonCode {
    pub year: i32,
    pub half: SeasonHalf,
}

impl SeasonCode {
    /// Comparable season one year earlier.
    pub fn prior_year(&self) -> SeasonCode {
        SeasonCode {
            year: self.year - 1,
            half: self.half,
        }
    }

    /// Two-digit year label, e.g. `25`.
    pub fn yy(&self) -> String {
        format!("{:02}", self.year.rem_euclid(100))
    }
}

impl fmt::Display for SeasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.yy(), self.half.letter())
    }
}

/// Season in effect at the as-of date. January and February still sell the
/// prior year's Fall season.
pub fn resolve_season_code(asof: NaiveDate) -> SeasonCode {
    match asof.month() {
        3..=8 => SeasonCode {
            year: asof.year(),
            half: SeasonHalf::Spring,
        },
        9..=12 => SeasonCode {
            year: asof.year(),
            half: SeasonHalf::Fall,
        },
        _ => SeasonCode {
            year: asof.year() - 1,
            half: SeasonHalf::Fall,
        },
    }
}
