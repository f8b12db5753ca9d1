//! Property tests for the regime scorer and the series normalizer.
//!
//! Uses proptest to verify:
//! 1. Bounds: every sub-score and the composite stay within [0, 100]
//! 2. Rounding: the composite carries at most one decimal
//! 3. The real rate never moves the score
//! 4. Normalized series are sorted and free of missing markers

use chrono::NaiveDate;
use proptest::prelude::*;

use macro_regime::data::normalize::{FRED_MISSING, bound_to_range, filter_and_sort, year_over_year_change};
use macro_regime::domain::{Observation, RawObservation};
use macro_regime::signals::RegimeInputs;
use macro_regime::signals::regime::WEIGHTS;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_reading() -> impl Strategy<Value = f64> {
    -50.0..50.0_f64
}

fn arb_inputs() -> impl Strategy<Value = RegimeInputs> {
    (
        arb_reading(),
        arb_reading(),
        0.0..30.0_f64,
        arb_reading(),
        arb_reading(),
        -300.0..300.0_f64,
        arb_reading(),
    )
        .prop_map(|(g, i, u, m, r, y, f)| RegimeInputs {
            gdp_growth: g,
            inflation: i,
            unemployment: u,
            manufacturing_index: m,
            real_rate: r,
            yield_curve_spread: y,
            fed_stance: f,
        })
}

fn arb_raw() -> impl Strategy<Value = RawObservation> {
    let date = (2000i32..2030, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| format!("{y}-{m:02}-{d:02}"));
    let value = prop_oneof![
        Just(".".to_string()),
        Just(String::new()),
        Just("n/a".to_string()),
        (-1000.0..1000.0_f64).prop_map(|v| format!("{v:.3}")),
    ];
    (date, value).prop_map(|(d, v)| RawObservation::new(d, v))
}

// ── 1-3. Scorer ─────────────────────────────────────────────────────

#[test]
fn weights_sum_to_one() {
    let total: f64 = WEIGHTS.iter().sum();
    assert!((total - 1.0).abs() < 1e-12);
}

proptest! {
    #[test]
    fn scores_stay_in_bounds(inputs in arb_inputs()) {
        let score = inputs.score();
        for sub in score.breakdown.as_array() {
            prop_assert!((0.0..=100.0).contains(&sub));
        }
        prop_assert!((0.0..=100.0).contains(&score.composite));
    }

    #[test]
    fn composite_has_one_decimal(inputs in arb_inputs()) {
        let c = inputs.score().composite;
        prop_assert!(((c * 10.0).round() - c * 10.0).abs() < 1e-6);
    }

    #[test]
    fn scoring_is_deterministic(inputs in arb_inputs()) {
        prop_assert_eq!(inputs.score(), inputs.score());
    }

    #[test]
    fn real_rate_is_ignored(inputs in arb_inputs(), other in arb_reading()) {
        let moved = RegimeInputs { real_rate: other, ..inputs };
        prop_assert_eq!(inputs.score(), moved.score());
    }
}

// ── 4. Normalizer ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn filtered_series_is_sorted_and_numeric(raw in prop::collection::vec(arb_raw(), 0..60)) {
        let series = filter_and_sort(&raw, FRED_MISSING);
        prop_assert!(series.windows(2).all(|w| w[0].date <= w[1].date));
        prop_assert!(series.iter().all(|o| o.value.is_finite()));

        let numeric = raw
            .iter()
            .filter(|r| r.value.as_deref().is_some_and(|v| v.parse::<f64>().is_ok()))
            .count();
        prop_assert_eq!(series.len(), numeric);
    }

    #[test]
    fn yoy_drops_the_first_year(values in prop::collection::vec(1.0..500.0_f64, 0..40)) {
        let series: Vec<Observation> = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let date = NaiveDate::from_ymd_opt(2000 + (i / 12) as i32, (i % 12) as u32 + 1, 1).unwrap();
                Observation::new(date, *v)
            })
            .collect();
        let yoy = year_over_year_change(&series);
        prop_assert_eq!(yoy.len(), series.len().saturating_sub(12));
        if let Some(first) = yoy.first() {
            prop_assert_eq!(first.date, series[12].date);
        }
    }

    #[test]
    fn bounded_points_fall_inside_the_window(
        offsets in prop::collection::vec(0i64..2000, 0..50),
        days in 0u32..1500,
    ) {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut series: Vec<Observation> = offsets
            .iter()
            .map(|o| Observation::new(today - chrono::Duration::days(*o), *o as f64))
            .collect();
        series.sort_by_key(|o| o.date);

        let start = today - chrono::Duration::days(i64::from(days));
        let bounded = bound_to_range(&series, days, today);
        prop_assert!(bounded.iter().all(|o| o.date >= start && o.date <= today));
        prop_assert_eq!(
            bounded.len(),
            series.iter().filter(|o| o.date >= start).count()
        );
    }
}
