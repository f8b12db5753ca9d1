//! Assemble snapshots and history bundles from an observation source.
//!
//! Each indicator is fetched independently: one failing series leaves its
//! field absent (and is reported) without stopping the rest of the cycle.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::data::fred::{FetchError, ObservationRequest, ObservationSource};
use crate::data::normalize::{
    FRED_MISSING, YOY_DISPLAY_POINTS, YOY_PERIODS, bound_to_range, cap_recent, filter_and_sort,
    window_start, year_over_year_change,
};
use crate::domain::{Indicator, MacroSnapshot, Observation, Series, SeriesOutcome};

/// Rough neutral policy rate: ~0.5% neutral real rate plus the 2% inflation target.
pub const DEFAULT_NEUTRAL_RATE: f64 = 2.5;

/// Extra history requested ahead of a YoY window so the first points have a year-ago base.
const YOY_LOOKBACK_DAYS: i64 = 400;

/// A freshly assembled snapshot plus the indicators that could not be fetched.
#[derive(Debug, Clone)]
pub struct SnapshotFetch {
    pub snapshot: MacroSnapshot,
    pub failures: Vec<(Indicator, String)>,
}

impl SnapshotFetch {
    /// True when no indicator produced a value.
    pub fn is_total_failure(&self) -> bool {
        self.snapshot.present_count() == 0
    }
}

/// History for every dashboard indicator over one window.
#[derive(Debug, Clone)]
pub struct HistoryBundle {
    pub days: u32,
    pub end: NaiveDate,
    pub series: BTreeMap<Indicator, SeriesOutcome>,
}

impl HistoryBundle {
    pub fn get(&self, indicator: Indicator) -> &[Observation] {
        self.series
            .get(&indicator)
            .map(|o| o.series())
            .unwrap_or(&[])
    }

    pub fn outcome(&self, indicator: Indicator) -> Option<&SeriesOutcome> {
        self.series.get(&indicator)
    }
}

pub struct MacroFetcher<'a> {
    source: &'a dyn ObservationSource,
    neutral_rate: f64,
}

impl<'a> MacroFetcher<'a> {
    pub fn new(source: &'a dyn ObservationSource, neutral_rate: f64) -> Self {
        Self {
            source,
            neutral_rate,
        }
    }

    /// Neutral-rate estimate used to derive the Fed stance.
    pub fn neutral_rate(&self) -> f64 {
        self.neutral_rate
    }

    /// Most recent valid observation of a series.
    pub fn latest(&self, series_id: &str) -> Result<Option<Observation>, FetchError> {
        // Ask for a few points so a trailing missing marker doesn't blank the reading.
        let raw = self.source.observations(&ObservationRequest::latest(series_id, 5))?;
        Ok(filter_and_sort(&raw, FRED_MISSING).last().copied())
    }

    /// Latest CPI year-over-year inflation.
    ///
    /// Two years of levels are requested so a missing month still leaves a
    /// year-ago base for the newest point.
    pub fn latest_inflation_yoy(&self) -> Result<Option<Observation>, FetchError> {
        let series_id = Indicator::Inflation.series_id();
        let raw = self
            .source
            .observations(&ObservationRequest::latest(series_id, 2 * YOY_PERIODS))?;
        let levels = filter_and_sort(&raw, FRED_MISSING);
        Ok(year_over_year_change(&levels).last().copied())
    }

    /// Fetch the current value of every indicator.
    pub fn fetch_snapshot(&self, timestamp: DateTime<Utc>) -> SnapshotFetch {
        let mut snapshot = MacroSnapshot::empty(timestamp);
        let mut failures = Vec::new();

        for indicator in Indicator::ALL {
            if indicator == Indicator::FedStance {
                continue;
            }
            let result = match indicator {
                Indicator::Inflation => self.latest_inflation_yoy(),
                other => self.latest(other.series_id()),
            };
            match result {
                Ok(obs) => snapshot.set(indicator, obs.map(|o| o.value)),
                Err(err) => {
                    log::warn!("{} unavailable: {err}", indicator.display_name());
                    failures.push((indicator, err.to_string()));
                }
            }
        }

        snapshot.neutral_rate = Some(self.neutral_rate);
        snapshot.fed_stance = snapshot.fed_funds.map(|f| f - self.neutral_rate);

        log::info!(
            "snapshot assembled: {}/{} indicators present",
            snapshot.present_count(),
            Indicator::ALL.len()
        );
        SnapshotFetch { snapshot, failures }
    }

    /// Ascending observations of a series within the last `days` days.
    pub fn series_history(&self, series_id: &str, days: u32, today: NaiveDate) -> SeriesOutcome {
        let start = window_start(today, i64::from(days));
        let result = self
            .source
            .observations(&ObservationRequest::range(series_id, start, today))
            .map(|raw| bound_to_range(&filter_and_sort(&raw, FRED_MISSING), days, today));
        outcome_from(series_id, result)
    }

    /// CPI year-over-year change for the last `days` days, capped to the display window.
    pub fn inflation_yoy_history(&self, days: u32, today: NaiveDate) -> SeriesOutcome {
        let series_id = Indicator::Inflation.series_id();
        let start = window_start(today, i64::from(days) + YOY_LOOKBACK_DAYS);
        let result = self
            .source
            .observations(&ObservationRequest::range(series_id, start, today))
            .map(|raw| {
                let levels = filter_and_sort(&raw, FRED_MISSING);
                let yoy = year_over_year_change(&levels);
                cap_recent(&bound_to_range(&yoy, days, today), YOY_DISPLAY_POINTS)
            });
        outcome_from(series_id, result)
    }

    /// History for all eight dashboard indicators.
    pub fn fetch_all_historical(&self, days: u32, today: NaiveDate) -> HistoryBundle {
        let mut series = BTreeMap::new();
        for indicator in Indicator::ALL {
            let outcome = match indicator {
                Indicator::Inflation => self.inflation_yoy_history(days, today),
                Indicator::FedStance => continue,
                other => self.series_history(other.series_id(), days, today),
            };
            series.insert(indicator, outcome);
        }

        let neutral = self.neutral_rate;
        let stance = series
            .get(&Indicator::FedFunds)
            .cloned()
            .unwrap_or(SeriesOutcome::Empty)
            .map_values(|v| v - neutral);
        series.insert(Indicator::FedStance, stance);

        HistoryBundle {
            days,
            end: today,
            series,
        }
    }
}

fn outcome_from(series_id: &str, result: Result<Series, FetchError>) -> SeriesOutcome {
    match result {
        Ok(series) => SeriesOutcome::from_series(series),
        Err(err) => {
            log::warn!("history for {series_id} unavailable: {err}");
            SeriesOutcome::Failed(err.to_string())
        }
    }
}
