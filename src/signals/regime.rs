//! Composite macro regime score.
//!
//! Six sub-scores, each clamped to `[0, 100]`, combined with fixed weights:
//!
//! | sub-score     | weight |
//! |---------------|--------|
//! | growth        | 0.25   |
//! | inflation     | 0.20   |
//! | employment    | 0.15   |
//! | manufacturing | 0.15   |
//! | yield curve   | 0.15   |
//! | fed stance    | 0.10   |
//!
//! The composite is rounded to one decimal place, ties to even.

use serde::Serialize;

use crate::domain::MacroSnapshot;

pub const WEIGHT_GROWTH: f64 = 0.25;
pub const WEIGHT_INFLATION: f64 = 0.20;
pub const WEIGHT_EMPLOYMENT: f64 = 0.15;
pub const WEIGHT_MANUFACTURING: f64 = 0.15;
pub const WEIGHT_YIELD_CURVE: f64 = 0.15;
pub const WEIGHT_FED_STANCE: f64 = 0.10;

pub const WEIGHTS: [f64; 6] = [
    WEIGHT_GROWTH,
    WEIGHT_INFLATION,
    WEIGHT_EMPLOYMENT,
    WEIGHT_MANUFACTURING,
    WEIGHT_YIELD_CURVE,
    WEIGHT_FED_STANCE,
];

/// Inflation target the inflation sub-score is centred on.
pub const INFLATION_TARGET: f64 = 2.0;

/// Healthy unemployment band (inclusive).
pub const UNEMPLOYMENT_BAND: (f64, f64) = (3.5, 4.5);

/// The seven scorer inputs. All required.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegimeInputs {
    pub gdp_growth: f64,
    pub inflation: f64,
    pub unemployment: f64,
    pub manufacturing_index: f64,
    /// Carried for completeness; not part of any sub-score.
    pub real_rate: f64,
    pub yield_curve_spread: f64,
    pub fed_stance: f64,
}

impl RegimeInputs {
    /// `None` unless all seven readings are present.
    pub fn from_snapshot(snapshot: &MacroSnapshot) -> Option<Self> {
        Some(Self {
            gdp_growth: snapshot.gdp_growth?,
            inflation: snapshot.inflation?,
            unemployment: snapshot.unemployment?,
            manufacturing_index: snapshot.manufacturing?,
            real_rate: snapshot.real_rate?,
            yield_curve_spread: snapshot.yield_spread?,
            fed_stance: snapshot.fed_stance?,
        })
    }

    pub fn breakdown(&self) -> RegimeBreakdown {
        RegimeBreakdown {
            growth: growth_score(self.gdp_growth),
            inflation: inflation_score(self.inflation),
            employment: employment_score(self.unemployment),
            manufacturing: manufacturing_score(self.manufacturing_index),
            yield_curve: yield_curve_score(self.yield_curve_spread),
            fed_stance: fed_stance_score(self.fed_stance),
        }
    }

    pub fn score(&self) -> RegimeScore {
        let breakdown = self.breakdown();
        RegimeScore {
            composite: breakdown.composite(),
            breakdown,
        }
    }
}

/// Unrounded sub-scores, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegimeBreakdown {
    pub growth: f64,
    pub inflation: f64,
    pub employment: f64,
    pub manufacturing: f64,
    pub yield_curve: f64,
    pub fed_stance: f64,
}

impl RegimeBreakdown {
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.growth,
            self.inflation,
            self.employment,
            self.manufacturing,
            self.yield_curve,
            self.fed_stance,
        ]
    }

    /// Weighted composite rounded to one decimal.
    pub fn composite(&self) -> f64 {
        let weighted: f64 = self
            .as_array()
            .iter()
            .zip(WEIGHTS.iter())
            .map(|(s, w)| s * w)
            .sum();
        round1(weighted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegimeScore {
    pub composite: f64,
    pub breakdown: RegimeBreakdown,
}

/// Composite regime score in `[0, 100]`, one decimal.
///
/// `real_rate` is accepted but does not enter any sub-score.
pub fn calculate_regime_score(
    gdp_growth: f64,
    inflation: f64,
    unemployment: f64,
    manufacturing_index: f64,
    real_rate: f64,
    yield_curve_spread: f64,
    fed_stance: f64,
) -> f64 {
    RegimeInputs {
        gdp_growth,
        inflation,
        unemployment,
        manufacturing_index,
        real_rate,
        yield_curve_spread,
        fed_stance,
    }
    .score()
    .composite
}

/// 6% growth saturates.
pub fn growth_score(gdp_growth: f64) -> f64 {
    (gdp_growth / 6.0 * 100.0).clamp(0.0, 100.0)
}

/// 30 points lost per percentage point away from target.
pub fn inflation_score(inflation: f64) -> f64 {
    (100.0 - (inflation - INFLATION_TARGET).abs() * 30.0).clamp(0.0, 100.0)
}

pub fn employment_score(unemployment: f64) -> f64 {
    let (low, high) = UNEMPLOYMENT_BAND;
    if (low..=high).contains(&unemployment) {
        100.0
    } else if unemployment < low {
        // Too tight: inflation risk.
        80.0
    } else {
        (100.0 - (unemployment - high) * 20.0).clamp(0.0, 100.0)
    }
}

/// Neutral (50) at zero.
pub fn manufacturing_score(manufacturing_index: f64) -> f64 {
    (50.0 + manufacturing_index * 2.0).clamp(0.0, 100.0)
}

/// Neutral (50) at a flat curve.
pub fn yield_curve_score(spread: f64) -> f64 {
    (50.0 + spread * 0.5).clamp(0.0, 100.0)
}

/// Penalizes distance from neutral policy in either direction.
pub fn fed_stance_score(fed_stance: f64) -> f64 {
    (100.0 - fed_stance.abs() * 40.0).clamp(0.0, 100.0)
}

/// Nearest one-decimal value of the exact binary `x`; exact ties go to the even digit.
fn round1(x: f64) -> f64 {
    // Formatting rounds the exact decimal expansion of `x`.
    format!("{x:.1}").parse().unwrap_or(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = WEIGHTS.iter().sum();
        assert!(close(total, 1.0), "weights sum to {total}");
    }

    #[test]
    fn employment_band_edges() {
        assert_eq!(employment_score(3.5), 100.0);
        assert_eq!(employment_score(4.5), 100.0);
        assert_eq!(employment_score(3.49), 80.0);
        assert!(close(employment_score(5.5), 80.0));
        assert_eq!(employment_score(12.0), 0.0);
    }

    #[test]
    fn sub_scores_clamp() {
        assert_eq!(growth_score(-3.0), 0.0);
        assert_eq!(growth_score(9.0), 100.0);
        assert_eq!(inflation_score(2.0), 100.0);
        assert_eq!(inflation_score(10.0), 0.0);
        assert_eq!(manufacturing_score(-40.0), 0.0);
        assert_eq!(manufacturing_score(40.0), 100.0);
        assert_eq!(yield_curve_score(0.0), 50.0);
        assert_eq!(yield_curve_score(-200.0), 0.0);
        assert_eq!(fed_stance_score(0.0), 100.0);
        assert_eq!(fed_stance_score(-3.0), 0.0);
    }

    #[test]
    fn worked_example_breakdown() {
        let inputs = RegimeInputs {
            gdp_growth: 4.4,
            inflation: 2.65,
            unemployment: 4.1,
            manufacturing_index: 10.0,
            real_rate: 1.92,
            yield_curve_spread: 15.0,
            fed_stance: 2.0,
        };
        let b = inputs.breakdown();
        assert!((b.growth - 73.333).abs() < 1e-3);
        assert!(close(b.inflation, 80.5));
        assert_eq!(b.employment, 100.0);
        assert!(close(b.manufacturing, 70.0));
        assert!(close(b.yield_curve, 57.5));
        assert!(close(b.fed_stance, 20.0));
        // 18.333 + 16.1 + 15 + 10.5 + 8.625 + 2.0 = 70.558
        assert_eq!(inputs.score().composite, 70.6);
    }

    #[test]
    fn dashboard_sample_readings() {
        // Spread quoted in percent (0.15) barely moves the curve sub-score.
        let score = calculate_regime_score(4.4, 2.65, 4.1, 10.0, 1.92, 0.15, 2.0);
        assert_eq!(score, 69.4);
    }

    #[test]
    fn exact_ties_round_to_even() {
        // 6.25 + 20 + 15 + 7.5 + 7.5 + 10 = 66.25 exactly.
        assert_eq!(calculate_regime_score(1.5, 2.0, 4.0, 0.0, 1.0, 0.0, 0.0), 66.2);
        assert_eq!(round1(0.25), 0.2);
        assert_eq!(round1(0.75), 0.8);
        assert_eq!(round1(70.558), 70.6);
        // 66.35 is stored just below the midpoint.
        assert_eq!(round1(66.35), 66.3);
    }

    #[test]
    fn real_rate_does_not_move_the_score() {
        let a = calculate_regime_score(2.5, 3.0, 4.0, 1.0, -5.0, 0.5, 0.5);
        let b = calculate_regime_score(2.5, 3.0, 4.0, 1.0, 5.0, 0.5, 0.5);
        assert_eq!(a, b);
    }

    #[test]
    fn repeated_calls_agree() {
        let first = calculate_regime_score(1.1, 4.2, 5.0, -3.0, 2.0, -0.4, 1.3);
        for _ in 0..10 {
            assert_eq!(calculate_regime_score(1.1, 4.2, 5.0, -3.0, 2.0, -0.4, 1.3), first);
        }
    }

    #[test]
    fn snapshot_needs_all_seven_inputs() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut snap = MacroSnapshot::empty(ts);
        snap.gdp_growth = Some(2.0);
        snap.inflation = Some(2.0);
        snap.unemployment = Some(4.0);
        snap.manufacturing = Some(0.0);
        snap.yield_spread = Some(0.0);
        snap.fed_stance = Some(0.0);
        assert!(RegimeInputs::from_snapshot(&snap).is_none());

        snap.real_rate = Some(1.0);
        let inputs = RegimeInputs::from_snapshot(&snap).unwrap();
        assert_eq!(inputs.manufacturing_index, 0.0);
        // 33.33*.25 + 100*.2 + 100*.15 + 50*.15 + 50*.15 + 100*.1 = 68.33
        assert_eq!(inputs.score().composite, 68.3);
    }
}
