//! # optscan - Options Chain Analytics
//!
//! A retail options-analytics core: given one underlying's option chain
//! snapshot, it infers the implied-volatility term structure, classifies
//! the volatility regime, scores contracts and two-leg verticals for
//! quality under a chosen strategy, and ranks the candidates.
//!
//! ## Overview
//!
//! The pipeline is pure, synchronous computation over in-memory data. Data
//! flows one direction:
//!
//! - **Chain normalization**: untrusted upstream records into a uniform
//!   `Chain` (fail-soft per record)
//! - **Term structure**: paired-strike ATM IV per expiration, interpolated
//!   to 30/90 DTE, with the near/far ratio
//! - **Regime**: quadrant logic over the term ratio and an implied/realized
//!   vol ratio, sigmoid fallback when the latter is unavailable
//! - **Scoring**: strategy-specific factors normalized cross-sectionally or
//!   against fixed baselines, blended into a 0-100 composite
//! - **Spreads**: credit/debit verticals under conservative fills and hard
//!   liquidity/risk guards
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::{NaiveDate, Utc};
//! use optscan::prelude::*;
//!
//! # let records: Vec<RawRecord> = Vec::new();
//! let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
//! let chain = Chain::from_records("SPY", &records, 497.50, today, Utc::now()).unwrap();
//!
//! // Rank long-premium candidates
//! let report = Scanner::new().scan(&chain, Strategy::Long, Some(1.05));
//! for candidate in &report.candidates {
//!     println!("{:3} {}", candidate.score, candidate.rationale);
//! }
//!
//! // Bull put credit spreads, seller-signed regime adjustment
//! let regime = classify(report.term.ratio, Some(1.05), Strategy::Short);
//! let spreads = CreditSpreadBuilder::default()
//!     .build(&chain, Outlook::Bull, regime.adjustment, None);
//! ```
//!
//! ## What This Crate Does NOT Do
//!
//! - Price options or solve for greeks/IV (quotes arrive pre-computed)
//! - Fetch market data, persist anything, or schedule scans
//! - Execute orders
//!
//! Greeks, implied vol and the realized-vol inputs come from external
//! collaborators; "today" is always an explicit parameter so every result
//! is deterministic and testable.

pub mod core;
pub mod scan;
pub mod spread;
pub mod vol;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{Chain, Contract, OptionType, RawRecord, ScanError, ScanResult};

    // Volatility analysis
    pub use crate::vol::{
        atm_iv, classify, iv_at_dte, realized_volatility, term_structure, RegimeMode, Strategy,
        TermStatus, TermStructure, VolRegime,
    };

    // Single-leg scanning
    pub use crate::scan::{
        Baselines, Normalization, ScanFilters, ScanReport, Scanner, ScoredContract, ScorerConfig,
    };

    // Spread construction
    pub use crate::spread::{
        CreditConfig, CreditSpreadBuilder, DebitConfig, DebitSpreadBuilder, Outlook,
        SpreadCandidate, SpreadKind,
    };
}

// Re-export main types at crate root
pub use crate::core::{ScanError, ScanResult};
pub use crate::scan::{ScanReport, Scanner};
