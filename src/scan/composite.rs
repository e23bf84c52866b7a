//! Cross-sectional normalization and the composite score
//!
//! Long:  raw = 0.40*z(compressed lambda) + 0.30*z(gamma efficiency)
//!              - 0.15*z(theta burn) + 0.15*delta bonus
//!              + regime adjustment - theta pain
//! Short: raw = 0.50*z(edge) + 0.30*z(pop) - 0.20*z(spread)
//!              + regime adjustment
//! Final: round(clamp(50 + raw * 12.5, 0, 100)), with a hard zero for any
//! contract whose relative spread exceeds the deal-breaker threshold.

use std::collections::BTreeMap;

use crate::core::Contract;
use crate::vol::Strategy;

use super::config::{BaselineStat, Normalization, ScorerConfig};
use super::metrics::{
    compress_lambda, delta_bonus, long_factors, short_factors, theta_pain, LongFactors,
    ShortFactors,
};
use super::ScoredContract;

/// Population mean and stddev with the small-sample guard: stddev is
/// treated as 1 when fewer than two observations exist or the population
/// is degenerate.
pub fn population_stats(values: &[f64]) -> BaselineStat {
    if values.len() < 2 {
        return BaselineStat::new(values.first().copied().unwrap_or(0.0), 1.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();
    BaselineStat::new(mean, if std > 0.0 { std } else { 1.0 })
}

/// Map a raw composite onto the 0-100 scale
pub fn finalize_score(raw: f64) -> u8 {
    (50.0 + raw * 12.5).clamp(0.0, 100.0).round() as u8
}

/// Score a filtered candidate set for one strategy.
///
/// `regime_adjustment` is the strategy-signed value from the regime
/// classifier. Contracts with a non-positive mid are excluded. Output is
/// unsorted; the scanner ranks and truncates.
pub fn score_contracts(
    contracts: &[&Contract],
    spot: f64,
    strategy: Strategy,
    regime_adjustment: f64,
    config: &ScorerConfig,
    normalization: &Normalization,
) -> Vec<ScoredContract> {
    match strategy {
        Strategy::Long => score_long(contracts, spot, regime_adjustment, config, normalization),
        Strategy::Short => score_short(contracts, regime_adjustment, config, normalization),
    }
}

fn score_long(
    contracts: &[&Contract],
    spot: f64,
    regime_adjustment: f64,
    config: &ScorerConfig,
    normalization: &Normalization,
) -> Vec<ScoredContract> {
    let factors: Vec<(&Contract, LongFactors)> = contracts
        .iter()
        .filter_map(|c| long_factors(c, spot).map(|f| (*c, f)))
        .collect();

    let compressed: Vec<f64> = factors
        .iter()
        .map(|(_, f)| compress_lambda(f.lambda, config))
        .collect();

    let (lambda_stat, gamma_stat, theta_stat) = match normalization {
        Normalization::Baseline(b) => (b.lambda, b.gamma_efficiency, b.theta_burn),
        Normalization::Population => (
            population_stats(&compressed),
            population_stats(&factors.iter().map(|(_, f)| f.gamma_efficiency).collect::<Vec<_>>()),
            population_stats(&factors.iter().map(|(_, f)| f.theta_burn).collect::<Vec<_>>()),
        ),
    };

    factors
        .iter()
        .zip(compressed.iter())
        .map(|((contract, f), &lambda_c)| {
            let bonus = delta_bonus(contract.abs_delta());
            let pain = theta_pain(f.theta_burn, config);

            let raw = config.w_lambda * lambda_stat.z(lambda_c)
                + config.w_gamma_efficiency * gamma_stat.z(f.gamma_efficiency)
                - config.w_theta_burn * theta_stat.z(f.theta_burn)
                + config.w_delta_bonus * bonus
                + regime_adjustment
                - pain;

            let spread_pct = contract.spread_pct().unwrap_or(f64::INFINITY);
            let vetoed = spread_pct > config.spread_deal_breaker;
            let score = if vetoed { 0 } else { finalize_score(raw) };

            let mut metrics = BTreeMap::new();
            metrics.insert("lambda".to_string(), f.lambda);
            metrics.insert("lambda_compressed".to_string(), lambda_c);
            metrics.insert("gamma_efficiency".to_string(), f.gamma_efficiency);
            metrics.insert("theta_burn".to_string(), f.theta_burn);
            metrics.insert("delta_bonus".to_string(), bonus);
            metrics.insert("theta_pain".to_string(), pain);
            metrics.insert("spread_pct".to_string(), spread_pct);

            let rationale = if vetoed {
                format!("Illiquid: {:.0}% bid/ask spread", spread_pct * 100.0)
            } else {
                format!(
                    "{:.1}x leverage at {:.2}% daily decay, delta {:.2}",
                    f.lambda,
                    f.theta_burn * 100.0,
                    contract.abs_delta()
                )
            };

            ScoredContract {
                contract: (*contract).clone(),
                metrics,
                score,
                rationale,
            }
        })
        .collect()
}

fn score_short(
    contracts: &[&Contract],
    regime_adjustment: f64,
    config: &ScorerConfig,
    normalization: &Normalization,
) -> Vec<ScoredContract> {
    let factors: Vec<(&Contract, ShortFactors)> = contracts
        .iter()
        .filter_map(|c| short_factors(c).map(|f| (*c, f)))
        .collect();

    let (edge_stat, pop_stat, spread_stat) = match normalization {
        Normalization::Baseline(b) => (b.edge, b.pop, b.spread_pct),
        Normalization::Population => (
            population_stats(&factors.iter().map(|(_, f)| f.edge).collect::<Vec<_>>()),
            population_stats(&factors.iter().map(|(_, f)| f.pop).collect::<Vec<_>>()),
            population_stats(&factors.iter().map(|(_, f)| f.spread_pct).collect::<Vec<_>>()),
        ),
    };

    factors
        .iter()
        .map(|(contract, f)| {
            let raw = config.w_edge * edge_stat.z(f.edge) + config.w_pop * pop_stat.z(f.pop)
                - config.w_spread * spread_stat.z(f.spread_pct)
                + regime_adjustment;

            let vetoed = f.spread_pct > config.spread_deal_breaker;
            let score = if vetoed { 0 } else { finalize_score(raw) };

            let mut metrics = BTreeMap::new();
            metrics.insert("pop".to_string(), f.pop);
            metrics.insert("edge".to_string(), f.edge);
            metrics.insert("spread_pct".to_string(), f.spread_pct);

            let rationale = if vetoed {
                format!("Illiquid: {:.0}% bid/ask spread", f.spread_pct * 100.0)
            } else {
                format!(
                    "{:.2} premium edge with {:.0}% win rate",
                    f.edge,
                    f.pop * 100.0
                )
            };

            ScoredContract {
                contract: (*contract).clone(),
                metrics,
                score,
                rationale,
            }
        })
        .collect()
}
