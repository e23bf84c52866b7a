//! Configuration for the spread builders
//!
//! The historical call sites drifted on several constants (minimum credit,
//! debit cost ceiling, risk/reward floor, anchor delta band). Each variant
//! survives as a named profile instead of being silently unified.

use serde::{Deserialize, Serialize};

/// Credit vertical builder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditConfig {
    /// Anchor (short leg) absolute-delta band
    /// Default: [0.20, 0.40]
    pub anchor_delta_min: f64,
    pub anchor_delta_max: f64,

    /// Candidate widths; empty means derive a ladder from spot
    pub widths: Vec<f64>,

    /// Minimum acceptable net credit
    /// Default: 0.10
    pub min_credit: f64,

    /// Worst-leg relative bid/ask spread allowed
    /// Default: 0.15
    pub max_leg_spread_pct: f64,

    /// Strike-matching tolerance when locating the protective leg
    /// Default: 0.01 (exact grid match)
    pub strike_tolerance: f64,

    /// Reject when a known earnings event lands inside the spread's DTE
    /// and within this many days
    /// Default: 10
    pub earnings_window_days: i64,

    /// Candidates returned after ranking
    /// Default: 5
    pub max_candidates: usize,
}

impl Default for CreditConfig {
    fn default() -> Self {
        Self {
            anchor_delta_min: 0.20,
            anchor_delta_max: 0.40,
            widths: Vec::new(),
            min_credit: 0.10,
            max_leg_spread_pct: 0.15,
            strike_tolerance: 0.01,
            earnings_window_days: 10,
            max_candidates: 5,
        }
    }
}

impl CreditConfig {
    /// Stricter entry: larger minimum credit
    pub fn conservative() -> Self {
        Self {
            min_credit: 0.15,
            ..Default::default()
        }
    }

    /// Widths to try, scaled to the underlying's price when not set
    /// explicitly
    pub fn widths_for_spot(&self, spot: f64) -> Vec<f64> {
        if !self.widths.is_empty() {
            return self.widths.clone();
        }
        width_ladder(spot)
    }
}

/// Debit vertical builder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebitConfig {
    /// Anchor (long leg) absolute-delta band
    /// Default: [0.40, 0.70]
    pub anchor_delta_min: f64,
    pub anchor_delta_max: f64,

    /// Candidate widths; empty means derive a ladder from spot
    pub widths: Vec<f64>,

    /// Reject when debit >= width * ceiling
    /// Default: 0.60
    pub cost_ceiling: f64,

    /// Reject when (width - debit) / debit falls below this
    /// Default: 1.0
    pub min_risk_reward: f64,

    /// Worst-leg relative bid/ask spread allowed
    /// Default: 0.15
    pub max_leg_spread_pct: f64,

    /// Strike-matching tolerance when locating the short leg
    /// Default: 0.01
    pub strike_tolerance: f64,

    /// Candidates returned after ranking
    /// Default: 5
    pub max_candidates: usize,
}

impl Default for DebitConfig {
    fn default() -> Self {
        Self {
            anchor_delta_min: 0.40,
            anchor_delta_max: 0.70,
            widths: Vec::new(),
            cost_ceiling: 0.60,
            min_risk_reward: 1.0,
            max_leg_spread_pct: 0.15,
            strike_tolerance: 0.01,
            max_candidates: 5,
        }
    }
}

impl DebitConfig {
    /// Stricter entry: narrower anchor band, cheaper cost ceiling, higher
    /// reward floor
    pub fn conservative() -> Self {
        Self {
            anchor_delta_min: 0.45,
            cost_ceiling: 0.50,
            min_risk_reward: 1.5,
            ..Default::default()
        }
    }

    pub fn widths_for_spot(&self, spot: f64) -> Vec<f64> {
        if !self.widths.is_empty() {
            return self.widths.clone();
        }
        width_ladder(spot)
    }
}

/// Default width ladder by underlying price bracket
fn width_ladder(spot: f64) -> Vec<f64> {
    if spot >= 1000.0 {
        vec![25.0, 50.0, 100.0]
    } else if spot >= 200.0 {
        vec![5.0, 10.0, 25.0]
    } else if spot >= 50.0 {
        vec![2.5, 5.0, 10.0]
    } else {
        vec![1.0, 2.5, 5.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_ladder_scales_with_spot() {
        let config = CreditConfig::default();
        assert_eq!(config.widths_for_spot(30.0), vec![1.0, 2.5, 5.0]);
        assert_eq!(config.widths_for_spot(100.0), vec![2.5, 5.0, 10.0]);
        assert_eq!(config.widths_for_spot(450.0), vec![5.0, 10.0, 25.0]);
        assert_eq!(config.widths_for_spot(4800.0), vec![25.0, 50.0, 100.0]);
    }

    #[test]
    fn test_explicit_widths_win() {
        let config = CreditConfig {
            widths: vec![1.0],
            ..Default::default()
        };
        assert_eq!(config.widths_for_spot(4800.0), vec![1.0]);
    }

    #[test]
    fn test_conservative_profiles() {
        assert_eq!(CreditConfig::conservative().min_credit, 0.15);
        let debit = DebitConfig::conservative();
        assert_eq!(debit.anchor_delta_min, 0.45);
        assert_eq!(debit.cost_ceiling, 0.50);
        assert_eq!(debit.min_risk_reward, 1.5);
    }
}
