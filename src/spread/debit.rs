//! Debit vertical builder
//!
//! Buys the anchor leg in the 0.40-0.70 delta band and sells a further-OTM
//! leg to cut the cost. Pricing is conservative: the debit assumes crossing
//! the spread on both legs (long ask minus short bid).

use crate::core::{Chain, Contract, OptionType};
use crate::scan::{compress_lambda, delta_bonus, ScorerConfig};

use super::config::DebitConfig;
use super::credit::find_leg;
use super::{rank_and_truncate, Outlook, SpreadCandidate, SpreadKind};

/// Builds and scores debit verticals from a chain snapshot
#[derive(Debug, Clone, Default)]
pub struct DebitSpreadBuilder {
    config: DebitConfig,
    /// Shaping constants shared with the single-leg scorer (lambda
    /// compression, delta-bonus curve)
    scorer: ScorerConfig,
}

impl DebitSpreadBuilder {
    pub fn new(config: DebitConfig) -> Self {
        Self {
            config,
            scorer: ScorerConfig::default(),
        }
    }

    pub fn with_scorer(mut self, scorer: ScorerConfig) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn config(&self) -> &DebitConfig {
        &self.config
    }

    /// Build debit verticals for the outlook.
    ///
    /// `regime_adjustment` is the buyer-signed value from the regime
    /// classifier (classified with the Long strategy, unflipped).
    pub fn build(
        &self,
        chain: &Chain,
        outlook: Outlook,
        regime_adjustment: f64,
    ) -> Vec<SpreadCandidate> {
        let leg_type = outlook.debit_leg();
        let widths = self.config.widths_for_spot(chain.spot);
        let mut candidates = Vec::new();

        for expiration in chain.expirations() {
            let legs = chain.slice(leg_type, expiration);
            let Some(dte) = legs.first().map(|c| c.days_to_expiry) else {
                continue;
            };
            if dte <= 0 {
                continue;
            }

            for anchor in &legs {
                if !self.anchor_ok(anchor) {
                    continue;
                }
                for &width in &widths {
                    // The sold leg sits further OTM than the bought leg
                    let target = match leg_type {
                        OptionType::Call => anchor.strike + width,
                        OptionType::Put => anchor.strike - width,
                    };
                    let Some(sold) = find_leg(&legs, target, self.config.strike_tolerance)
                    else {
                        continue;
                    };
                    if !self.leg_liquid(sold) {
                        continue;
                    }

                    let debit = anchor.ask - sold.bid;
                    if debit <= 0.0 || debit >= width * self.config.cost_ceiling {
                        continue;
                    }
                    let risk_reward = (width - debit) / debit;
                    if risk_reward < self.config.min_risk_reward {
                        continue;
                    }

                    let Ok(mut spread) = SpreadCandidate::new(
                        sold.clone(),
                        (*anchor).clone(),
                        SpreadKind::Debit,
                        debit,
                    ) else {
                        continue;
                    };

                    let (score, rationale) =
                        self.score(&spread, chain.spot, regime_adjustment);
                    spread.score = score;
                    spread.rationale = rationale;
                    candidates.push(spread);
                }
            }
        }

        rank_and_truncate(&mut candidates, self.config.max_candidates);
        candidates
    }

    fn anchor_ok(&self, contract: &Contract) -> bool {
        let delta = contract.abs_delta();
        delta >= self.config.anchor_delta_min
            && delta <= self.config.anchor_delta_max
            && self.leg_liquid(contract)
    }

    fn leg_liquid(&self, contract: &Contract) -> bool {
        matches!(contract.spread_pct(), Some(s) if s <= self.config.max_leg_spread_pct)
    }

    /// Weighted blend: compressed net-delta leverage (0.40), risk/reward
    /// against a 3:1 reference (0.40), the single-leg delta-bonus curve
    /// mapped through the composite midpoint (0.20), plus the regime term
    /// scaled by 2.5.
    fn score(
        &self,
        spread: &SpreadCandidate,
        spot: f64,
        regime_adjustment: f64,
    ) -> (u8, String) {
        let net_delta = (spread.long_leg.abs_delta() - spread.short_leg.abs_delta()).abs();
        let leverage = if spread.net_price > 0.0 {
            net_delta * spot / spread.net_price
        } else {
            0.0
        };
        let compressed = compress_lambda(leverage, &self.scorer);
        let leverage_score = (compressed / self.scorer.lambda_threshold).min(1.0) * 100.0;

        let risk_reward = spread.roi();
        let rr_score = (risk_reward / 3.0).min(1.0) * 100.0;

        let bonus = delta_bonus(spread.long_leg.abs_delta());

        let raw = 0.40 * leverage_score + 0.40 * rr_score + 0.20 * (50.0 + bonus * 12.5)
            + 2.5 * regime_adjustment;
        let score = raw.clamp(0.0, 100.0).round() as u8;

        let rationale = format!(
            "{:.1}:1 reward/risk at {:.1}x leverage, delta {:.2}",
            risk_reward,
            leverage,
            spread.long_leg.abs_delta()
        );
        (score, rationale)
    }
}
