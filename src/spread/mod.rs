//! Two-leg vertical spread construction
//!
//! Pairs contracts into credit or debit verticals under conservative fill
//! assumptions (cross the spread on both legs), applies hard
//! liquidity/risk guards, and scores each candidate 0-100. Both legs of a
//! vertical always share expiration and option type.

mod config;
mod credit;
mod debit;

pub use config::*;
pub use credit::*;
pub use debit::*;

use serde::{Deserialize, Serialize};

use crate::core::{Contract, OptionType, ScanError, ScanResult};

/// Spread financing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpreadKind {
    /// Net premium received; max profit = credit, max risk = width - credit
    Credit,
    /// Net premium paid; max risk = debit, max profit = width - debit
    Debit,
}

/// Directional outlook, mapped to the leg type per spread kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outlook {
    Bull,
    Bear,
}

impl Outlook {
    /// Leg type for a credit vertical: bulls sell put spreads, bears sell
    /// call spreads
    pub fn credit_leg(&self) -> OptionType {
        match self {
            Outlook::Bull => OptionType::Put,
            Outlook::Bear => OptionType::Call,
        }
    }

    /// Leg type for a debit vertical: bulls buy call spreads, bears buy
    /// put spreads
    pub fn debit_leg(&self) -> OptionType {
        match self {
            Outlook::Bull => OptionType::Call,
            Outlook::Bear => OptionType::Put,
        }
    }
}

/// A scored two-leg vertical spread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpreadCandidate {
    /// Leg sold (credit) or sold against the anchor (debit)
    pub short_leg: Contract,
    /// Leg bought
    pub long_leg: Contract,
    pub kind: SpreadKind,
    /// Strike distance between the legs (> 0)
    pub width: f64,
    /// Net credit received or net debit paid, conservative fills
    pub net_price: f64,
    pub max_risk: f64,
    pub max_profit: f64,
    /// Composite score, 0-100
    pub score: u8,
    /// Human-readable summary of the dominant factors
    pub rationale: String,
}

impl SpreadCandidate {
    /// Build a candidate from two legs, validating the vertical invariants.
    ///
    /// Rejects mismatched expiration/type and zero width at construction
    /// time; risk/reward fields are derived from the kind.
    pub fn new(
        short_leg: Contract,
        long_leg: Contract,
        kind: SpreadKind,
        net_price: f64,
    ) -> ScanResult<Self> {
        if short_leg.expiration != long_leg.expiration {
            return Err(ScanError::invalid_input(
                "vertical legs must share an expiration",
            ));
        }
        if short_leg.option_type != long_leg.option_type {
            return Err(ScanError::invalid_input(
                "vertical legs must share an option type",
            ));
        }
        let width = (short_leg.strike - long_leg.strike).abs();
        if width <= 0.0 {
            return Err(ScanError::invalid_input("vertical width must be positive"));
        }

        let (max_risk, max_profit) = match kind {
            SpreadKind::Credit => (width - net_price, net_price),
            SpreadKind::Debit => (net_price, width - net_price),
        };

        Ok(Self {
            short_leg,
            long_leg,
            kind,
            width,
            net_price,
            max_risk,
            max_profit,
            score: 0,
            rationale: String::new(),
        })
    }

    /// Return on capital at risk
    pub fn roi(&self) -> f64 {
        if self.max_risk > 0.0 {
            self.max_profit / self.max_risk
        } else {
            0.0
        }
    }

    /// Probability-of-profit proxy from the short leg's delta
    pub fn pop(&self) -> f64 {
        1.0 - self.short_leg.abs_delta()
    }

    /// Distance from spot to the short strike, as a fraction of spot
    pub fn otm_distance(&self, spot: f64) -> f64 {
        (spot - self.short_leg.strike).abs() / spot
    }

    pub fn days_to_expiry(&self) -> i64 {
        self.short_leg.days_to_expiry
    }
}

/// Sort candidates best-first (stable: ties keep build order) and keep the
/// top `n`.
pub(crate) fn rank_and_truncate(candidates: &mut Vec<SpreadCandidate>, n: usize) {
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates.truncate(n);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn leg(strike: f64, option_type: OptionType, expiration: NaiveDate, delta: f64) -> Contract {
        Contract {
            symbol: None,
            strike,
            option_type,
            expiration,
            days_to_expiry: 35,
            bid: 1.2,
            ask: 1.3,
            delta,
            gamma: 0.02,
            theta: -0.02,
            vega: 0.1,
            implied_vol: 0.2,
            volume: 100,
            open_interest: 100,
        }
    }

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_credit_risk_reward_derivation() {
        let short = leg(95.0, OptionType::Put, expiry(), -0.30);
        let long = leg(90.0, OptionType::Put, expiry(), -0.15);
        let spread = SpreadCandidate::new(short, long, SpreadKind::Credit, 0.50).unwrap();

        assert_eq!(spread.width, 5.0);
        assert_eq!(spread.max_profit, 0.50);
        assert_eq!(spread.max_risk, 4.50);
        assert!((spread.roi() - 0.50 / 4.50).abs() < 1e-12);
        assert!((spread.pop() - 0.70).abs() < 1e-12);
    }

    #[test]
    fn test_debit_risk_reward_derivation() {
        let long = leg(100.0, OptionType::Call, expiry(), 0.55);
        let short = leg(105.0, OptionType::Call, expiry(), 0.35);
        let spread = SpreadCandidate::new(short, long, SpreadKind::Debit, 1.70).unwrap();

        assert_eq!(spread.width, 5.0);
        assert_eq!(spread.max_risk, 1.70);
        assert!((spread.max_profit - 3.30).abs() < 1e-12);
    }

    #[test]
    fn test_invariants_rejected_at_construction() {
        let put = leg(95.0, OptionType::Put, expiry(), -0.30);
        let call = leg(90.0, OptionType::Call, expiry(), 0.15);
        assert!(SpreadCandidate::new(put.clone(), call, SpreadKind::Credit, 0.5).is_err());

        let other_expiry = NaiveDate::from_ymd_opt(2024, 4, 19).unwrap();
        let late = leg(90.0, OptionType::Put, other_expiry, -0.15);
        assert!(SpreadCandidate::new(put.clone(), late, SpreadKind::Credit, 0.5).is_err());

        let same = leg(95.0, OptionType::Put, expiry(), -0.30);
        assert!(SpreadCandidate::new(put, same, SpreadKind::Credit, 0.5).is_err());
    }

    #[test]
    fn test_outlook_leg_mapping() {
        assert_eq!(Outlook::Bull.credit_leg(), OptionType::Put);
        assert_eq!(Outlook::Bear.credit_leg(), OptionType::Call);
        assert_eq!(Outlook::Bull.debit_leg(), OptionType::Call);
        assert_eq!(Outlook::Bear.debit_leg(), OptionType::Put);
    }
}
