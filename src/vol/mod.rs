//! Implied-volatility term structure and regime analysis
//!
//! Three stages, each degrading to an explicit "unavailable" value rather
//! than erroring when the chain is too thin:
//! 1. **ATM extraction**: paired call/put IV at the strike nearest spot
//! 2. **Term interpolation**: IV at an arbitrary tenor from bracketing
//!    expirations, plus the 30d/90d ratio
//! 3. **Regime classification**: quadrant logic over the term ratio and an
//!    implied/realized vol ratio, with a sigmoid fallback

mod atm;
mod regime;
mod term;

pub use atm::*;
pub use regime::*;
pub use term::*;

use serde::{Deserialize, Serialize};

/// Term-structure shape classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TermStatus {
    /// Near-term IV cheaper than far-term (ratio < 0.95)
    Contango,
    /// Near-term IV in line with far-term
    Neutral,
    /// Near-term IV richer than far-term (ratio > 1.05)
    Backwardation,
}

impl TermStatus {
    /// Whether this shape favors selling premium
    pub fn favors_selling(&self) -> bool {
        matches!(self, TermStatus::Contango | TermStatus::Neutral)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TermStatus::Contango => "contango",
            TermStatus::Neutral => "neutral",
            TermStatus::Backwardation => "backwardation",
        }
    }
}

/// Interpolated IV term structure for one chain snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermStructure {
    /// IV at 30 DTE, if the chain brackets it
    pub iv30: Option<f64>,
    /// IV at 90 DTE, if the chain brackets it
    pub iv90: Option<f64>,
    /// iv30/iv90; 1.0 when either leg is unavailable or the raw ratio is an
    /// outlier
    pub ratio: f64,
    /// Shape classification from the final ratio
    pub status: TermStatus,
    /// Raw ratio fell outside [0.5, 2.0] and was reset to neutral
    pub outlier: bool,
}

impl TermStructure {
    /// Neutral result used when the chain cannot support a term structure
    pub fn neutral(iv30: Option<f64>, iv90: Option<f64>) -> Self {
        Self {
            iv30,
            iv90,
            ratio: 1.0,
            status: TermStatus::Neutral,
            outlier: false,
        }
    }
}

/// Trailing realized volatility from daily closes.
///
/// Close-to-close log-return standard deviation over the last `window`
/// sessions, annualized by sqrt(252). Needs `window + 1` closes; returns
/// None on insufficient or non-positive price data. This is the collaborator
/// formula behind the implied/realized ratio fed to the regime classifier.
pub fn realized_volatility(closes: &[f64], window: usize) -> Option<f64> {
    if window < 2 || closes.len() < window + 1 {
        return None;
    }

    let tail = &closes[closes.len() - (window + 1)..];
    let returns: Vec<f64> = tail
        .windows(2)
        .filter(|w| w[0] > 0.0 && w[1] > 0.0)
        .map(|w| (w[1] / w[0]).ln())
        .collect();
    if returns.len() < 2 {
        return None;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Some(variance.sqrt() * (252.0_f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realized_vol_constant_prices_is_zero() {
        let closes = vec![100.0; 30];
        let rv = realized_volatility(&closes, 20).unwrap();
        assert!(rv.abs() < 1e-12);
    }

    #[test]
    fn test_realized_vol_needs_window_plus_one() {
        let closes = vec![100.0; 20];
        assert!(realized_volatility(&closes, 20).is_none());
    }

    #[test]
    fn test_realized_vol_alternating_series() {
        // +1%/-1% alternation: per-day log returns ~ +-0.00995, stddev ~ 0.01
        let mut closes = vec![100.0];
        for i in 0..30 {
            let last = *closes.last().unwrap();
            closes.push(if i % 2 == 0 { last * 1.01 } else { last * 0.99 });
        }
        let rv = realized_volatility(&closes, 20).unwrap();
        // ~0.01 * sqrt(252) ~ 0.16
        assert!(rv > 0.10 && rv < 0.25, "rv = {rv}");
    }

    #[test]
    fn test_favors_selling() {
        assert!(TermStatus::Contango.favors_selling());
        assert!(TermStatus::Neutral.favors_selling());
        assert!(!TermStatus::Backwardation.favors_selling());
    }
}
