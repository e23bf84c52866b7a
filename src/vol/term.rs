//! Term-structure interpolation
//!
//! Estimates ATM IV at an arbitrary tenor from the irregular set of
//! expirations actually present in the chain, and derives the 30d/90d
//! near/far ratio. Interpolation only: a target outside the observed
//! bracket is "unavailable", never extrapolated, so a thin chain cannot
//! fabricate a term structure.

use tracing::warn;

use crate::core::Chain;

use super::{atm_iv, TermStatus, TermStructure};

/// Raw ratio bounds; anything outside is a data-integrity outlier
const RATIO_MIN: f64 = 0.5;
const RATIO_MAX: f64 = 2.0;

/// Status thresholds on the final ratio
const CONTANGO_BELOW: f64 = 0.95;
const BACKWARDATION_ABOVE: f64 = 1.05;

/// ATM IV at `target_dte`, linearly interpolated between the nearest
/// bracketing expirations. Expired buckets are ignored.
pub fn iv_at_dte(chain: &Chain, target_dte: i64) -> Option<f64> {
    let buckets: Vec<i64> = chain
        .dte_buckets()
        .into_iter()
        .filter(|&dte| dte > 0)
        .collect();
    if buckets.is_empty() {
        return None;
    }

    if buckets.contains(&target_dte) {
        return atm_iv(&chain.at_dte(target_dte), chain.spot);
    }

    let near = buckets.iter().copied().filter(|&d| d < target_dte).max()?;
    let far = buckets.iter().copied().filter(|&d| d > target_dte).min()?;

    let iv_near = atm_iv(&chain.at_dte(near), chain.spot)?;
    let iv_far = atm_iv(&chain.at_dte(far), chain.spot)?;

    let t = (target_dte - near) as f64 / (far - near) as f64;
    Some(iv_near + (iv_far - iv_near) * t)
}

/// IV term structure from the 30d and 90d tenors.
///
/// ratio = iv30/iv90 when both legs exist and iv90 > 0, else 1.0. A raw
/// ratio outside [0.5, 2.0] is reset to 1.0 and flagged as an outlier; the
/// scan proceeds on the neutral value rather than aborting.
pub fn term_structure(chain: &Chain) -> TermStructure {
    let iv30 = iv_at_dte(chain, 30);
    let iv90 = iv_at_dte(chain, 90);

    let raw_ratio = match (iv30, iv90) {
        (Some(near), Some(far)) if far > 0.0 => near / far,
        _ => return TermStructure::neutral(iv30, iv90),
    };

    let (ratio, outlier) = if (RATIO_MIN..=RATIO_MAX).contains(&raw_ratio) {
        (raw_ratio, false)
    } else {
        warn!(
            symbol = %chain.symbol,
            raw_ratio,
            "term ratio outside sane bounds, resetting to neutral"
        );
        (1.0, true)
    };

    let status = if ratio < CONTANGO_BELOW {
        TermStatus::Contango
    } else if ratio > BACKWARDATION_ABOVE {
        TermStatus::Backwardation
    } else {
        TermStatus::Neutral
    };

    TermStructure {
        iv30,
        iv90,
        ratio,
        status,
        outlier,
    }
}
