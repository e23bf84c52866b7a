//! Volatility regime classification
//!
//! Combines the term-structure ratio with an implied/realized vol ratio
//! into a single directional adjustment for the composite scorers. Two
//! paths:
//! - both inputs present: quadrant table (value / momentum / trap / fear)
//!   with a linear blend for the in-between cases
//! - IV/RV unavailable: a sigmoid risk factor hinged at the 1.10 panic
//!   threshold on the term ratio alone
//!
//! The adjustment is expressed from the buyer's point of view and negated
//! for premium sellers.

use serde::{Deserialize, Serialize};

/// Single-leg strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Long premium: buy calls/puts, debit spreads
    Long,
    /// Short premium: sell credit spreads
    Short,
}

/// Which spread style the current regime favors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegimeMode {
    Debit,
    Credit,
    Neutral,
}

/// Classified volatility regime, recomputed per scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolRegime {
    pub term_ratio: f64,
    pub iv_realized_ratio: Option<f64>,
    pub mode: RegimeMode,
    /// Score adjustment in composite-raw units, already signed for the
    /// requested strategy
    pub adjustment: f64,
}

/// Term ratio above which the sigmoid fallback treats the market as panicked
const PANIC_THRESHOLD: f64 = 1.10;
/// Sigmoid steepness around the panic threshold
const PANIC_SLOPE: f64 = 12.0;

const CONTANGO_BELOW: f64 = 1.0;
const BACKWARDATION_ABOVE: f64 = 1.05;
const CHEAP_BELOW: f64 = 0.95;
const EXPENSIVE_ABOVE: f64 = 1.1;

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Classify the volatility regime and derive the strategy-signed adjustment.
pub fn classify(term_ratio: f64, iv_realized_ratio: Option<f64>, strategy: Strategy) -> VolRegime {
    let (long_adjustment, mode) = match iv_realized_ratio {
        Some(ivr) => {
            let is_contango = term_ratio < CONTANGO_BELOW;
            let is_backwardation = term_ratio > BACKWARDATION_ABOVE;
            let is_cheap = ivr < CHEAP_BELOW;
            let is_expensive = ivr > EXPENSIVE_ABOVE;

            let adjustment = if is_contango && is_cheap {
                // Value zone: calm curve, options priced below movement
                2.5
            } else if is_backwardation && is_cheap {
                // Momentum zone: stressed curve but vol still underpriced
                1.0
            } else if is_contango && is_expensive {
                // Trap zone: calm curve masking rich premium
                -2.0
            } else if is_backwardation && is_expensive {
                // Fear zone: everything rich, worst entry for buyers
                -3.0
            } else {
                ((1.0 - term_ratio) * 5.0 + (1.0 - ivr) * 5.0) / 2.0
            };

            let mode = if is_expensive {
                RegimeMode::Credit
            } else if is_cheap {
                RegimeMode::Debit
            } else {
                RegimeMode::Neutral
            };

            (adjustment, mode)
        }
        None => {
            // Sigmoid phase transition on the term ratio alone: smooth but
            // sharply hinged at the panic threshold
            let risk = 0.9 + 0.4 * logistic(PANIC_SLOPE * (term_ratio - PANIC_THRESHOLD));
            let mode = if term_ratio > PANIC_THRESHOLD {
                RegimeMode::Credit
            } else if term_ratio < CHEAP_BELOW {
                RegimeMode::Debit
            } else {
                RegimeMode::Neutral
            };
            ((1.0 - risk) * 5.0, mode)
        }
    };

    let adjustment = match strategy {
        Strategy::Long => long_adjustment,
        Strategy::Short => -long_adjustment,
    };

    VolRegime {
        term_ratio,
        iv_realized_ratio,
        mode,
        adjustment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_zone() {
        let regime = classify(0.90, Some(0.80), Strategy::Long);
        assert_eq!(regime.adjustment, 2.5);
        assert_eq!(regime.mode, RegimeMode::Debit);
    }

    #[test]
    fn test_momentum_zone() {
        let regime = classify(1.10, Some(0.80), Strategy::Long);
        assert_eq!(regime.adjustment, 1.0);
    }

    #[test]
    fn test_trap_zone() {
        let regime = classify(0.90, Some(1.30), Strategy::Long);
        assert_eq!(regime.adjustment, -2.0);
        assert_eq!(regime.mode, RegimeMode::Credit);
    }

    #[test]
    fn test_fear_zone() {
        let regime = classify(1.20, Some(1.30), Strategy::Long);
        assert_eq!(regime.adjustment, -3.0);
    }

    #[test]
    fn test_boundary_case_interpolates() {
        // term_ratio 1.02: neither contango nor backwardation; ivr 1.0:
        // neither cheap nor expensive. Linear blend:
        // ((1 - 1.02)*5 + (1 - 1.0)*5) / 2 = -0.05
        let regime = classify(1.02, Some(1.0), Strategy::Long);
        assert!((regime.adjustment - (-0.05)).abs() < 1e-12);
        assert_eq!(regime.mode, RegimeMode::Neutral);
    }

    #[test]
    fn test_short_strategy_negates() {
        let long = classify(0.90, Some(0.80), Strategy::Long);
        let short = classify(0.90, Some(0.80), Strategy::Short);
        assert_eq!(long.adjustment, -short.adjustment);
    }

    #[test]
    fn test_sigmoid_fallback_centered_at_panic() {
        // At the hinge the logistic is 0.5: risk = 1.1, long adj = -0.5
        let regime = classify(1.10, None, Strategy::Long);
        assert!((regime.adjustment - (-0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_sigmoid_fallback_tails() {
        // Deep contango: risk saturates at 0.9, buyers get +0.5
        let calm = classify(0.70, None, Strategy::Long);
        assert!(calm.adjustment > 0.45 && calm.adjustment <= 0.5);

        // Deep backwardation: risk saturates at 1.3, buyers get -2.0
        let panic = classify(1.60, None, Strategy::Long);
        assert!(panic.adjustment < -1.9 && panic.adjustment >= -2.0);

        // Sellers see the mirror image
        let panic_short = classify(1.60, None, Strategy::Short);
        assert!((panic_short.adjustment + panic.adjustment).abs() < 1e-12);
    }

    #[test]
    fn test_fallback_mode_thresholds() {
        assert_eq!(classify(1.20, None, Strategy::Long).mode, RegimeMode::Credit);
        assert_eq!(classify(0.90, None, Strategy::Long).mode, RegimeMode::Debit);
        assert_eq!(classify(1.00, None, Strategy::Long).mode, RegimeMode::Neutral);
    }
}
