//! Turn raw provider output into analysis-ready series.
//!
//! Every function here is pure: no I/O, no clocks (callers pass `today`).

use chrono::{Duration, NaiveDate};

use crate::domain::{Observation, RawObservation, Series};

/// FRED's marker for a missing observation value.
pub const FRED_MISSING: &str = ".";

/// Periods between a level and its year-ago comparison (monthly data).
pub const YOY_PERIODS: usize = 12;

/// Display window for year-over-year history (two years of monthly points).
pub const YOY_DISPLAY_POINTS: usize = 24;

/// Drop missing/unparsable observations and sort ascending by date.
///
/// The sort is stable, so repeated dates keep their input order.
pub fn filter_and_sort(raw: &[RawObservation], missing_marker: &str) -> Series {
    let mut out: Series = raw
        .iter()
        .filter_map(|obs| {
            let value = parse_value(obs.value.as_deref()?, missing_marker)?;
            let date = NaiveDate::parse_from_str(obs.date.trim(), "%Y-%m-%d").ok()?;
            Some(Observation::new(date, value))
        })
        .collect();
    out.sort_by_key(|o| o.date);
    out
}

fn parse_value(raw: &str, missing_marker: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == missing_marker || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

/// Year-over-year percent change of an ascending level series.
///
/// Point `i` compares against point `i - 12`; the first twelve points produce
/// nothing and a zero base is skipped.
pub fn year_over_year_change(levels: &[Observation]) -> Series {
    let mut out = Vec::with_capacity(levels.len().saturating_sub(YOY_PERIODS));
    for i in YOY_PERIODS..levels.len() {
        let base = levels[i - YOY_PERIODS].value;
        if base == 0.0 {
            continue;
        }
        let change = (levels[i].value - base) / base * 100.0;
        if change.is_finite() {
            out.push(Observation::new(levels[i].date, change));
        }
    }
    out
}

/// `today` minus `days`, saturating at the earliest representable date.
pub fn window_start(today: NaiveDate, days: i64) -> NaiveDate {
    today
        .checked_sub_signed(Duration::days(days))
        .unwrap_or(NaiveDate::MIN)
}

/// Keep observations dated within `[today - days, today]` (inclusive).
pub fn bound_to_range(series: &[Observation], days: u32, today: NaiveDate) -> Series {
    let start = window_start(today, i64::from(days));
    series
        .iter()
        .filter(|o| o.date >= start && o.date <= today)
        .copied()
        .collect()
}

/// Keep the most recent `n` points.
pub fn cap_recent(series: &[Observation], n: usize) -> Series {
    let skip = series.len().saturating_sub(n);
    series[skip..].to_vec()
}
