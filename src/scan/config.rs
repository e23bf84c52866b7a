//! Configuration for the single-leg scan pipeline
//!
//! All thresholds and weights live in explicit config structs handed into
//! the scorer, never in module-level singletons, so alternate baselines are
//! a test fixture away.

use serde::{Deserialize, Serialize};

use crate::core::Contract;

/// Hard numeric pre-filters applied before any scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanFilters {
    /// Minimum days to expiry
    /// Default: 7
    pub min_dte: i64,

    /// Maximum days to expiry
    /// Default: 60
    pub max_dte: i64,

    /// Strike window around spot as a fraction of spot
    /// Default: 0.15 (strikes within +-15%)
    pub strike_window_pct: f64,

    /// Minimum traded volume
    /// Default: 10
    pub min_volume: u64,

    /// Maximum relative bid/ask spread; quotes with no usable mid fail
    /// Default: 0.15
    pub max_spread_pct: f64,

    /// Absolute delta range
    /// Default: [0.05, 0.95]
    pub min_delta: f64,
    pub max_delta: f64,

    /// Candidates returned after ranking
    /// Default: 20
    pub max_results: usize,
}

impl Default for ScanFilters {
    fn default() -> Self {
        Self {
            min_dte: 7,
            max_dte: 60,
            strike_window_pct: 0.15,
            min_volume: 10,
            max_spread_pct: 0.15,
            min_delta: 0.05,
            max_delta: 0.95,
            max_results: 20,
        }
    }
}

impl ScanFilters {
    /// Does a contract pass every hard filter?
    pub fn accept(&self, contract: &Contract, spot: f64) -> bool {
        if contract.days_to_expiry < self.min_dte || contract.days_to_expiry > self.max_dte {
            return false;
        }
        if contract.moneyness(spot) > self.strike_window_pct {
            return false;
        }
        if contract.volume < self.min_volume {
            return false;
        }
        match contract.spread_pct() {
            Some(spread) if spread <= self.max_spread_pct => {}
            _ => return false,
        }
        let delta = contract.abs_delta();
        delta >= self.min_delta && delta <= self.max_delta
    }
}

/// Shaping constants for the composite scorer.
///
/// Two named profiles exist because the historical call sites diverged on
/// the theta-pain cap: ranked scans cap the penalty at 10 while the
/// single-position view caps at 50. Both are preserved as profiles rather
/// than silently unified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Lambda above this is compressed
    /// Default: 20
    pub lambda_threshold: f64,

    /// Decay applied to lambda beyond the threshold
    /// Default: 0.1
    pub lambda_decay: f64,

    /// Daily theta burn below this draws no penalty
    /// Default: 0.005 (0.5%/day)
    pub theta_safe_zone: f64,

    /// Upper bound on the theta pain penalty
    pub theta_pain_cap: f64,

    /// Relative spread above this forces a zero score (illiquidity veto)
    /// Default: 0.15
    pub spread_deal_breaker: f64,

    /// Long composite weights
    pub w_lambda: f64,
    pub w_gamma_efficiency: f64,
    pub w_theta_burn: f64,
    pub w_delta_bonus: f64,

    /// Short composite weights
    pub w_edge: f64,
    pub w_pop: f64,
    pub w_spread: f64,
}

impl ScorerConfig {
    /// Profile for ranked scans across many contracts
    pub fn scan() -> Self {
        Self {
            lambda_threshold: 20.0,
            lambda_decay: 0.1,
            theta_safe_zone: 0.005,
            theta_pain_cap: 10.0,
            spread_deal_breaker: 0.15,
            w_lambda: 0.40,
            w_gamma_efficiency: 0.30,
            w_theta_burn: 0.15,
            w_delta_bonus: 0.15,
            w_edge: 0.50,
            w_pop: 0.30,
            w_spread: 0.20,
        }
    }

    /// Profile for evaluating one held position
    pub fn position() -> Self {
        Self {
            theta_pain_cap: 50.0,
            ..Self::scan()
        }
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self::scan()
    }
}

/// Mean/stddev pair a metric is normalized against
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BaselineStat {
    pub mean: f64,
    pub std: f64,
}

impl BaselineStat {
    pub fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    /// Z-score of a value against this baseline
    pub fn z(&self, value: f64) -> f64 {
        let std = if self.std > 0.0 { self.std } else { 1.0 };
        (value - self.mean) / std
    }
}

/// Fixed cross-scan baselines.
///
/// Used whenever scores must be comparable across separate scans or tickers
/// (portfolio views); population-relative normalization is only meaningful
/// inside a single ranked list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Baselines {
    pub lambda: BaselineStat,
    pub gamma_efficiency: BaselineStat,
    pub theta_burn: BaselineStat,
    pub edge: BaselineStat,
    pub pop: BaselineStat,
    pub spread_pct: BaselineStat,
}

impl Default for Baselines {
    fn default() -> Self {
        Self {
            lambda: BaselineStat::new(8.0, 4.0),
            gamma_efficiency: BaselineStat::new(0.02, 0.015),
            theta_burn: BaselineStat::new(0.03, 0.02),
            edge: BaselineStat::new(0.8, 0.4),
            pop: BaselineStat::new(0.7, 0.15),
            spread_pct: BaselineStat::new(0.03, 0.03),
        }
    }
}

/// How metric z-scores are produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Normalization {
    /// Against the other candidates in the current scan
    Population,
    /// Against fixed baselines, for cross-scan comparability
    Baseline(Baselines),
}

impl Default for Normalization {
    fn default() -> Self {
        Normalization::Population
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionType;
    use chrono::NaiveDate;

    fn contract() -> Contract {
        Contract {
            symbol: None,
            strike: 100.0,
            option_type: OptionType::Call,
            expiration: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            days_to_expiry: 30,
            bid: 2.0,
            ask: 2.1,
            delta: 0.5,
            gamma: 0.05,
            theta: -0.03,
            vega: 0.1,
            implied_vol: 0.2,
            volume: 500,
            open_interest: 1000,
        }
    }

    #[test]
    fn test_filters_accept_reasonable_contract() {
        assert!(ScanFilters::default().accept(&contract(), 100.0));
    }

    #[test]
    fn test_filters_reject_out_of_band() {
        let filters = ScanFilters::default();

        let mut expired = contract();
        expired.days_to_expiry = 2;
        assert!(!filters.accept(&expired, 100.0));

        let mut far_otm = contract();
        far_otm.strike = 130.0;
        assert!(!filters.accept(&far_otm, 100.0));

        let mut illiquid = contract();
        illiquid.volume = 0;
        assert!(!filters.accept(&illiquid, 100.0));

        let mut wide = contract();
        wide.bid = 1.0;
        wide.ask = 2.0;
        assert!(!filters.accept(&wide, 100.0));

        let mut dead = contract();
        dead.bid = 0.0;
        dead.ask = 0.0;
        assert!(!filters.accept(&dead, 100.0));
    }

    #[test]
    fn test_profiles_differ_only_in_cap() {
        let scan = ScorerConfig::scan();
        let position = ScorerConfig::position();
        assert_eq!(scan.theta_pain_cap, 10.0);
        assert_eq!(position.theta_pain_cap, 50.0);
        assert_eq!(scan.lambda_threshold, position.lambda_threshold);
    }

    #[test]
    fn test_baseline_z_guard() {
        let stat = BaselineStat::new(5.0, 0.0);
        assert_eq!(stat.z(7.0), 2.0);
    }
}
