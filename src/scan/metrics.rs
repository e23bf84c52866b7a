//! Raw per-contract factors and shaped penalty/bonus curves
//!
//! Everything here is a pure function of one contract (plus spot) and the
//! scorer config. Population-relative normalization and the composite
//! blend live in `composite`.

use serde::{Deserialize, Serialize};

use crate::core::Contract;

use super::config::ScorerConfig;

/// Raw factors for long-premium scoring
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LongFactors {
    /// Effective leverage: |delta| * spot / mid
    pub lambda: f64,
    /// Convexity per premium dollar: gamma / mid
    pub gamma_efficiency: f64,
    /// Daily decay per premium dollar: |theta| / mid
    pub theta_burn: f64,
}

/// Raw factors for short-premium scoring
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShortFactors {
    /// Probability-of-profit proxy: 1 - |delta|
    pub pop: f64,
    /// Expected seller revenue: pop * mid
    pub edge: f64,
    /// Relative bid/ask spread
    pub spread_pct: f64,
}

/// Long factors at the contract's mid price. None when mid <= 0.
pub fn long_factors(contract: &Contract, spot: f64) -> Option<LongFactors> {
    let mid = contract.mid();
    if mid <= 0.0 {
        return None;
    }
    Some(LongFactors {
        lambda: contract.abs_delta() * spot / mid,
        gamma_efficiency: contract.gamma / mid,
        theta_burn: contract.theta.abs() / mid,
    })
}

/// Short factors at the contract's mid price. None when mid <= 0.
pub fn short_factors(contract: &Contract) -> Option<ShortFactors> {
    let mid = contract.mid();
    if mid <= 0.0 {
        return None;
    }
    let pop = 1.0 - contract.abs_delta();
    Some(ShortFactors {
        pop,
        edge: pop * mid,
        spread_pct: (contract.ask - contract.bid) / mid,
    })
}

/// Compress extreme leverage.
///
/// Beyond the threshold only a fraction of each additional turn of leverage
/// counts, so far-OTM contracts cannot dominate the ranking purely through
/// IV/price artifacts. Identity below the threshold.
pub fn compress_lambda(lambda: f64, config: &ScorerConfig) -> f64 {
    if lambda > config.lambda_threshold {
        config.lambda_threshold + (lambda - config.lambda_threshold) * config.lambda_decay
    } else {
        lambda
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Piecewise-linear bonus over |delta|.
///
/// Rewards near-the-money exposure; penalizes deep-OTM lottery tickets and
/// fades to nothing for deep-ITM stock substitutes.
pub fn delta_bonus(abs_delta: f64) -> f64 {
    let d = abs_delta;
    if d < 0.15 {
        -2.0
    } else if d < 0.30 {
        lerp(-2.0, -0.5, (d - 0.15) / 0.15)
    } else if d < 0.50 {
        lerp(-0.5, 1.0, (d - 0.30) / 0.20)
    } else if d < 0.70 {
        lerp(1.0, 0.5, (d - 0.50) / 0.20)
    } else if d <= 1.0 {
        lerp(0.5, 0.0, (d - 0.70) / 0.30)
    } else {
        0.0
    }
}

/// Quadratic penalty on theta burn above the safe zone, capped per profile.
pub fn theta_pain(theta_burn: f64, config: &ScorerConfig) -> f64 {
    if theta_burn <= config.theta_safe_zone {
        return 0.0;
    }
    let excess = (theta_burn - config.theta_safe_zone) * 100.0;
    (excess.powi(2) * 0.5).min(config.theta_pain_cap)
}
