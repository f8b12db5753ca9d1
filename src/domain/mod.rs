//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - the indicator catalogue (`Indicator`)
//! - raw and normalized observations (`RawObservation`, `Observation`, `Series`)
//! - snapshot records (`MacroSnapshot`, `ScoredSnapshot`) and signals

pub mod types;

pub use types::*;
