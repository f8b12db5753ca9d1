//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - assembled in-memory during a fetch cycle
//! - persisted to the snapshot store / exported to JSON and CSV
//! - handed to the terminal dashboard for rendering

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::signals::regime::RegimeScore;

/// Dashboard metrics, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    GdpGrowth,
    Inflation,
    Unemployment,
    #[serde(rename = "ism_pmi")]
    #[value(name = "ism-pmi", alias = "manufacturing")]
    Manufacturing,
    RealRate,
    YieldSpread,
    FedFunds,
    FedStance,
}

impl Indicator {
    pub const ALL: [Indicator; 8] = [
        Indicator::GdpGrowth,
        Indicator::Inflation,
        Indicator::Unemployment,
        Indicator::Manufacturing,
        Indicator::RealRate,
        Indicator::YieldSpread,
        Indicator::FedFunds,
        Indicator::FedStance,
    ];

    /// Stable key used in JSON and CSV output.
    pub fn key(self) -> &'static str {
        match self {
            Indicator::GdpGrowth => "gdp_growth",
            Indicator::Inflation => "inflation",
            Indicator::Unemployment => "unemployment",
            Indicator::Manufacturing => "ism_pmi",
            Indicator::RealRate => "real_rate",
            Indicator::YieldSpread => "yield_spread",
            Indicator::FedFunds => "fed_funds",
            Indicator::FedStance => "fed_stance",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Indicator::GdpGrowth => "GDP Growth",
            Indicator::Inflation => "Inflation (CPI YoY)",
            Indicator::Unemployment => "Unemployment",
            Indicator::Manufacturing => "Manufacturing Index",
            Indicator::RealRate => "10Y Real Rate (TIPS)",
            Indicator::YieldSpread => "2Y-10Y Yield Spread",
            Indicator::FedFunds => "Fed Funds Rate",
            Indicator::FedStance => "Fed Stance vs Neutral",
        }
    }

    /// FRED series backing this indicator.
    ///
    /// Inflation is the CPI level (YoY is derived locally); fed stance is
    /// derived from the fed funds series.
    pub fn series_id(self) -> &'static str {
        match self {
            Indicator::GdpGrowth => "A191RL1Q225SBEA",
            Indicator::Inflation => "CPIAUCSL",
            Indicator::Unemployment => "UNRATE",
            Indicator::Manufacturing => "MANEMP",
            Indicator::RealRate => "DFII10",
            Indicator::YieldSpread => "T10Y2Y",
            Indicator::FedFunds => "FEDFUNDS",
            Indicator::FedStance => "FEDFUNDS",
        }
    }

    /// Whether values are quoted in percent.
    pub fn is_percent(self) -> bool {
        !matches!(self, Indicator::Manufacturing)
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|i| *i == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|i| *i == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Observation as delivered by the provider, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawObservation {
    pub date: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl RawObservation {
    pub fn new(date: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            value: Some(value.into()),
        }
    }
}

/// A clean date/value point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Observations ordered ascending by date (duplicates are passed through).
pub type Series = Vec<Observation>;

/// Result of a best-effort series fetch.
///
/// Keeps "the provider had nothing" apart from "the request failed", while
/// both still render as an empty series.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesOutcome {
    Data(Series),
    Empty,
    Failed(String),
}

impl SeriesOutcome {
    pub fn from_series(series: Series) -> Self {
        if series.is_empty() {
            SeriesOutcome::Empty
        } else {
            SeriesOutcome::Data(series)
        }
    }

    pub fn series(&self) -> &[Observation] {
        match self {
            SeriesOutcome::Data(series) => series,
            SeriesOutcome::Empty | SeriesOutcome::Failed(_) => &[],
        }
    }

    pub fn into_series(self) -> Series {
        match self {
            SeriesOutcome::Data(series) => series,
            SeriesOutcome::Empty | SeriesOutcome::Failed(_) => Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SeriesOutcome::Failed(_))
    }

    /// Apply a point-wise transform, preserving empty/failed states.
    pub fn map_values(self, f: impl Fn(f64) -> f64) -> Self {
        match self {
            SeriesOutcome::Data(series) => SeriesOutcome::Data(
                series
                    .into_iter()
                    .map(|o| Observation::new(o.date, f(o.value)))
                    .collect(),
            ),
            other => other,
        }
    }

    pub fn status_label(&self) -> String {
        match self {
            SeriesOutcome::Data(series) => format!("{} pts", series.len()),
            SeriesOutcome::Empty => "no data".to_string(),
            SeriesOutcome::Failed(reason) => format!("failed: {reason}"),
        }
    }
}

/// Point-in-time readings for all dashboard metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroSnapshot {
    pub gdp_growth: Option<f64>,
    pub inflation: Option<f64>,
    pub unemployment: Option<f64>,
    #[serde(rename = "ism_pmi", alias = "manufacturing")]
    pub manufacturing: Option<f64>,
    pub real_rate: Option<f64>,
    pub yield_spread: Option<f64>,
    pub fed_funds: Option<f64>,
    pub neutral_rate: Option<f64>,
    pub fed_stance: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl MacroSnapshot {
    /// Snapshot with every reading absent.
    pub fn empty(timestamp: DateTime<Utc>) -> Self {
        Self {
            gdp_growth: None,
            inflation: None,
            unemployment: None,
            manufacturing: None,
            real_rate: None,
            yield_spread: None,
            fed_funds: None,
            neutral_rate: None,
            fed_stance: None,
            timestamp,
        }
    }

    pub fn get(&self, indicator: Indicator) -> Option<f64> {
        match indicator {
            Indicator::GdpGrowth => self.gdp_growth,
            Indicator::Inflation => self.inflation,
            Indicator::Unemployment => self.unemployment,
            Indicator::Manufacturing => self.manufacturing,
            Indicator::RealRate => self.real_rate,
            Indicator::YieldSpread => self.yield_spread,
            Indicator::FedFunds => self.fed_funds,
            Indicator::FedStance => self.fed_stance,
        }
    }

    pub fn set(&mut self, indicator: Indicator, value: Option<f64>) {
        let slot = match indicator {
            Indicator::GdpGrowth => &mut self.gdp_growth,
            Indicator::Inflation => &mut self.inflation,
            Indicator::Unemployment => &mut self.unemployment,
            Indicator::Manufacturing => &mut self.manufacturing,
            Indicator::RealRate => &mut self.real_rate,
            Indicator::YieldSpread => &mut self.yield_spread,
            Indicator::FedFunds => &mut self.fed_funds,
            Indicator::FedStance => &mut self.fed_stance,
        };
        *slot = value;
    }

    /// Number of indicator readings present (neutral rate excluded).
    pub fn present_count(&self) -> usize {
        Indicator::ALL
            .iter()
            .filter(|i| self.get(**i).is_some())
            .count()
    }
}

/// A snapshot together with its derived regime score (absent when inputs are incomplete).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSnapshot {
    #[serde(flatten)]
    pub snapshot: MacroSnapshot,
    pub regime: Option<RegimeScore>,
}

impl ScoredSnapshot {
    pub fn new(snapshot: MacroSnapshot) -> Self {
        let regime = crate::signals::regime::RegimeInputs::from_snapshot(&snapshot).map(|i| i.score());
        Self { snapshot, regime }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalAction {
    Buy,
    Sell,
}

impl SignalAction {
    pub fn label(self) -> &'static str {
        match self {
            SignalAction::Buy => "BUY",
            SignalAction::Sell => "SELL",
        }
    }
}

/// Outcome of the buy/sell rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub action: SignalAction,
    pub reason: String,
}
