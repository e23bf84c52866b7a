//! Credit vertical builder
//!
//! Sells the anchor leg in the 0.20-0.40 delta band and buys protection
//! one width further out of the money (below for put spreads, above for
//! call spreads). Pricing is conservative: the credit assumes crossing the
//! spread on both legs (short bid minus long ask).

use tracing::debug;

use crate::core::{Chain, Contract, OptionType};

use super::config::CreditConfig;
use super::{rank_and_truncate, Outlook, SpreadCandidate, SpreadKind};

/// Builds and scores credit verticals from a chain snapshot
#[derive(Debug, Clone, Default)]
pub struct CreditSpreadBuilder {
    config: CreditConfig,
}

impl CreditSpreadBuilder {
    pub fn new(config: CreditConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CreditConfig {
        &self.config
    }

    /// Build credit verticals for the outlook.
    ///
    /// `regime_adjustment` is the seller-signed value from the regime
    /// classifier (classified with the Short strategy). `days_to_earnings`
    /// enables the gamma-risk guard: expirations that straddle an imminent
    /// earnings event are skipped entirely.
    pub fn build(
        &self,
        chain: &Chain,
        outlook: Outlook,
        regime_adjustment: f64,
        days_to_earnings: Option<i64>,
    ) -> Vec<SpreadCandidate> {
        let leg_type = outlook.credit_leg();
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

            if let Some(days) = days_to_earnings {
                if days >= 0 && days <= dte && days <= self.config.earnings_window_days {
                    debug!(
                        symbol = %chain.symbol,
                        dte,
                        days_to_earnings = days,
                        "skipping expiration inside earnings window"
                    );
                    continue;
                }
            }

            for anchor in &legs {
                if !self.anchor_ok(anchor) {
                    continue;
                }
                for &width in &widths {
                    let target = match leg_type {
                        OptionType::Put => anchor.strike - width,
                        OptionType::Call => anchor.strike + width,
                    };
                    let Some(protection) = find_leg(&legs, target, self.config.strike_tolerance)
                    else {
                        continue;
                    };
                    if !self.leg_liquid(protection) {
                        continue;
                    }

                    let credit = anchor.bid - protection.ask;
                    if credit <= self.config.min_credit {
                        continue;
                    }

                    let Ok(mut spread) = SpreadCandidate::new(
                        (*anchor).clone(),
                        protection.clone(),
                        SpreadKind::Credit,
                        credit,
                    ) else {
                        continue;
                    };
                    if spread.max_risk <= 0.0 {
                        continue;
                    }

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

    /// Weighted blend: capped ROI, POP, OTM cushion, DTE sweet spot, plus
    /// the regime term. 0.35*roi + 0.35*pop + 0.15*cushion on a 0-100
    /// scale, sweet-spot bonus up to 10, regime scaled by 2.5.
    fn score(
        &self,
        spread: &SpreadCandidate,
        spot: f64,
        regime_adjustment: f64,
    ) -> (u8, String) {
        let roi = spread.roi().min(1.0);
        let pop = spread.pop();
        let cushion = (spread.otm_distance(spot) / 0.10).min(1.0);
        let dte_bonus = dte_sweet_spot(spread.days_to_expiry());

        let raw = 35.0 * roi + 35.0 * pop + 15.0 * cushion + dte_bonus
            + 2.5 * regime_adjustment;
        let score = raw.clamp(0.0, 100.0).round() as u8;

        let rationale = format!(
            "{:.0}% ROI with {:.0}% win rate, {:.1}% OTM cushion",
            spread.roi() * 100.0,
            pop * 100.0,
            spread.otm_distance(spot) * 100.0
        );
        (score, rationale)
    }
}

/// DTE sweet-spot bonus: peaks at 10 inside 30-45, ramps from 0 at 7 and
/// back to 0 at 60.
pub(crate) fn dte_sweet_spot(dte: i64) -> f64 {
    let d = dte as f64;
    if (30.0..=45.0).contains(&d) {
        10.0
    } else if d > 7.0 && d < 30.0 {
        10.0 * (d - 7.0) / 23.0
    } else if d > 45.0 && d < 60.0 {
        10.0 * (60.0 - d) / 15.0
    } else {
        0.0
    }
}

/// Locate the leg whose strike is within tolerance of the target
pub(crate) fn find_leg<'a>(
    legs: &[&'a Contract],
    target: f64,
    tolerance: f64,
) -> Option<&'a Contract> {
    legs.iter()
        .find(|c| (c.strike - target).abs() <= tolerance)
        .copied()
}
