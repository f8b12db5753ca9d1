//! Hand-coded BUY/SELL rule over the latest snapshot.

use crate::domain::{MacroSnapshot, Signal, SignalAction};

/// BUY on strong growth with low inflation and low real rates; SELL on
/// contraction or high inflation.
///
/// BUY needs all three readings. SELL fires on whichever of growth and
/// inflation is present. Returns `None` when no rule fires.
pub fn evaluate_signal(snapshot: &MacroSnapshot) -> Option<Signal> {
    let growth = snapshot.gdp_growth;
    let inflation = snapshot.inflation;

    if let (Some(g), Some(i), Some(r)) = (growth, inflation, snapshot.real_rate) {
        if g > 2.0 && i < 3.0 && r < 1.0 {
            return Some(Signal {
                action: SignalAction::Buy,
                reason: "Strong growth, low inflation, low real rates".to_string(),
            });
        }
    }

    if growth.is_some_and(|g| g < 0.0) || inflation.is_some_and(|i| i > 4.0) {
        return Some(Signal {
            action: SignalAction::Sell,
            reason: "Negative growth or high inflation".to_string(),
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn snap(growth: f64, inflation: f64, real_rate: f64) -> MacroSnapshot {
        let mut s = MacroSnapshot::empty(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        s.gdp_growth = Some(growth);
        s.inflation = Some(inflation);
        s.real_rate = Some(real_rate);
        s
    }

    #[test]
    fn buy_when_goldilocks() {
        let signal = evaluate_signal(&snap(2.5, 2.4, 0.5)).unwrap();
        assert_eq!(signal.action, SignalAction::Buy);
    }

    #[test]
    fn sell_on_contraction_or_hot_inflation() {
        assert_eq!(evaluate_signal(&snap(-0.5, 2.0, 2.0)).unwrap().action, SignalAction::Sell);
        assert_eq!(evaluate_signal(&snap(3.0, 4.5, 0.0)).unwrap().action, SignalAction::Sell);
    }

    #[test]
    fn quiet_in_between() {
        assert!(evaluate_signal(&snap(4.4, 2.65, 1.92)).is_none());
        assert!(evaluate_signal(&snap(2.0, 2.0, 0.0)).is_none());
    }

    #[test]
    fn sell_does_not_need_the_real_rate() {
        let mut s = snap(-1.0, 5.0, 0.0);
        s.real_rate = None;
        assert_eq!(evaluate_signal(&s).unwrap().action, SignalAction::Sell);

        let mut hot = snap(3.0, 4.5, 0.0);
        hot.gdp_growth = None;
        assert_eq!(evaluate_signal(&hot).unwrap().action, SignalAction::Sell);
    }

    #[test]
    fn buy_needs_every_reading() {
        let mut s = snap(2.5, 2.4, 0.5);
        s.real_rate = None;
        assert!(evaluate_signal(&s).is_none());

        let empty = MacroSnapshot::empty(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert!(evaluate_signal(&empty).is_none());
    }
}
