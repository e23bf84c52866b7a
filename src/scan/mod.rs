//! Single-leg contract scoring
//!
//! Computes strategy-specific raw factors per contract, normalizes them
//! cross-sectionally (or against fixed baselines), and blends them into a
//! 0-100 composite. The `Scanner` facade wires filters, term structure and
//! regime into one call.

mod composite;
mod config;
mod metrics;
mod scanner;

pub use composite::*;
pub use config::*;
pub use metrics::*;
pub use scanner::*;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::Contract;
use crate::vol::{TermStructure, VolRegime};

/// A contract with its raw metrics and composite score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredContract {
    pub contract: Contract,
    /// Raw factor values by name, for display and audit
    pub metrics: BTreeMap<String, f64>,
    /// Composite score, 0-100
    pub score: u8,
    /// Human-readable summary of the dominant factors
    pub rationale: String,
}

impl ScoredContract {
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }
}

/// Result of one single-leg scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Ranked candidates, best first; ties keep input order
    pub candidates: Vec<ScoredContract>,
    /// Term structure computed for the chain
    pub term: TermStructure,
    /// Regime the scores were adjusted by
    pub regime: VolRegime,
    /// Spot price used
    pub spot: f64,
    /// Contracts seen before filtering
    pub scanned: usize,
    /// Contracts that passed the hard filters
    pub passed: usize,
}

impl ScanReport {
    pub fn best(&self) -> Option<&ScoredContract> {
        self.candidates.first()
    }

    /// Candidates scoring at or above a floor
    pub fn scoring_at_least(&self, floor: u8) -> Vec<&ScoredContract> {
        self.candidates.iter().filter(|c| c.score >= floor).collect()
    }
}
