//! ATM implied-volatility extraction
//!
//! For a set of contracts sharing one DTE bucket, finds the strike nearest
//! spot that carries BOTH a call and a put with usable IV, and averages the
//! two. Requiring both sides removes one-sided skew noise; a strike quoted
//! only on the put side says more about hedging flow than about the ATM
//! vol level. This is a data-quality gate, not an optimization.

use std::collections::BTreeMap;

use crate::core::{Contract, OptionType};

#[derive(Debug, Default)]
struct StrikePair {
    strike: f64,
    call_iv: Option<f64>,
    put_iv: Option<f64>,
}

/// Average call/put IV at the strike nearest spot.
///
/// Returns None when the slice is empty, no strike has both legs, or either
/// leg's IV is zero/missing.
pub fn atm_iv(contracts: &[&Contract], spot: f64) -> Option<f64> {
    let mut by_strike: BTreeMap<i64, StrikePair> = BTreeMap::new();

    for contract in contracts {
        if contract.implied_vol <= 0.0 {
            continue;
        }
        // Cent-resolution key so float strikes group reliably
        let key = (contract.strike * 100.0).round() as i64;
        let pair = by_strike.entry(key).or_default();
        pair.strike = contract.strike;
        match contract.option_type {
            OptionType::Call => pair.call_iv = Some(contract.implied_vol),
            OptionType::Put => pair.put_iv = Some(contract.implied_vol),
        }
    }

    by_strike
        .values()
        .filter_map(|pair| match (pair.call_iv, pair.put_iv) {
            (Some(call_iv), Some(put_iv)) => Some((pair.strike, (call_iv + put_iv) / 2.0)),
            _ => None,
        })
        .min_by(|(a, _), (b, _)| {
            let da = (a - spot).abs();
            let db = (b - spot).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(_, iv)| iv)
}
