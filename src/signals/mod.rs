//! Derived signals: the composite regime score and the BUY/SELL rule.

pub mod regime;
pub mod rules;

pub use regime::{RegimeBreakdown, RegimeInputs, RegimeScore, calculate_regime_score};
pub use rules::evaluate_signal;
