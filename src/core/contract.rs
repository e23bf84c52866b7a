//! Option contract quotes
//!
//! A `Contract` is one option quote from a chain snapshot: strike, type,
//! expiration, bid/ask, greeks, implied vol and liquidity counters. It is
//! immutable once normalized and lives for exactly one scan request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Payoff direction: +1 for call, -1 for put
    pub fn phi(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Parse an explicit type flag from an upstream record.
    ///
    /// Only the record's dedicated type field is accepted. The type is never
    /// re-derived from a packed contract symbol; that upstream shortcut is a
    /// known bug source.
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag.trim().to_ascii_uppercase().as_str() {
            "C" | "CALL" => Some(OptionType::Call),
            "P" | "PUT" => Some(OptionType::Put),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OptionType::Call => "Call",
            OptionType::Put => "Put",
        }
    }
}

/// One normalized option quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    /// Contract symbol as supplied by the source, if any
    pub symbol: Option<String>,
    /// Strike price
    pub strike: f64,
    /// Option type (Call/Put)
    pub option_type: OptionType,
    /// Expiration date
    pub expiration: NaiveDate,
    /// Calendar days to expiry; negative for expired contracts
    pub days_to_expiry: i64,
    /// Bid price (>= 0)
    pub bid: f64,
    /// Ask price (>= 0)
    pub ask: f64,
    /// Delta (signed per convention)
    pub delta: f64,
    /// Gamma
    pub gamma: f64,
    /// Theta (typically <= 0, per day)
    pub theta: f64,
    /// Vega
    pub vega: f64,
    /// Implied volatility (>= 0, annualized)
    pub implied_vol: f64,
    /// Trading volume
    pub volume: u64,
    /// Open interest
    pub open_interest: u64,
}

impl Contract {
    /// Mid price, (bid + ask) / 2
    pub fn mid(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }

    /// Relative bid/ask spread, (ask - bid) / mid. None when mid <= 0.
    pub fn spread_pct(&self) -> Option<f64> {
        let mid = self.mid();
        if mid > 0.0 {
            Some((self.ask - self.bid) / mid)
        } else {
            None
        }
    }

    /// Absolute delta
    pub fn abs_delta(&self) -> f64 {
        self.delta.abs()
    }

    /// Strike distance from spot as a fraction of spot
    pub fn moneyness(&self, spot: f64) -> f64 {
        (self.strike - spot).abs() / spot
    }

    pub fn is_expired(&self) -> bool {
        self.days_to_expiry < 0
    }

    /// Is this contract out of the money at the given spot?
    pub fn is_otm(&self, spot: f64) -> bool {
        match self.option_type {
            OptionType::Call => self.strike > spot,
            OptionType::Put => self.strike < spot,
        }
    }
}

/// One raw per-contract record as handed over by a market-data collaborator.
///
/// Every field is optional: delayed-quote feeds routinely omit greeks or
/// liquidity counters, and a single degenerate record must not sink the
/// chain. Normalization coerces missing numerics to zero and drops records
/// with no parseable strike, expiration or type flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    pub symbol: Option<String>,
    /// Explicit type flag ("C"/"P"/"call"/"put")
    pub option_type: Option<String>,
    pub strike: Option<f64>,
    pub expiration: Option<NaiveDate>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub delta: Option<f64>,
    pub gamma: Option<f64>,
    pub theta: Option<f64>,
    pub vega: Option<f64>,
    pub implied_vol: Option<f64>,
    pub volume: Option<u64>,
    pub open_interest: Option<u64>,
}

impl RawRecord {
    /// Normalize into a `Contract`, given an explicit "today".
    ///
    /// Returns None for a malformed record (missing/non-positive strike,
    /// missing expiration, unparseable type flag). Missing numeric fields
    /// coerce to 0; prices are floored at 0.
    pub fn normalize(&self, today: NaiveDate) -> Option<Contract> {
        let strike = self.strike.filter(|s| s.is_finite() && *s > 0.0)?;
        let expiration = self.expiration?;
        let option_type = OptionType::from_flag(self.option_type.as_deref()?)?;
        let days_to_expiry = (expiration - today).num_days();

        Some(Contract {
            symbol: self.symbol.clone(),
            strike,
            option_type,
            expiration,
            days_to_expiry,
            bid: coerce(self.bid).max(0.0),
            ask: coerce(self.ask).max(0.0),
            delta: coerce(self.delta),
            gamma: coerce(self.gamma),
            theta: coerce(self.theta),
            vega: coerce(self.vega),
            implied_vol: coerce(self.implied_vol).max(0.0),
            volume: self.volume.unwrap_or(0),
            open_interest: self.open_interest.unwrap_or(0),
        })
    }
}

fn coerce(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}
