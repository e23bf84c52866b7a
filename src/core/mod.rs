//! Core data types for the options-analytics pipeline
//!
//! Defines fundamental types:
//! - Contract: strike, expiry, type (call/put), bid/ask, greeks, IV
//! - Chain: one underlying's snapshot plus spot and timestamp
//! - RawRecord: untrusted upstream record shape, normalized fail-soft
//! - ScanError: crate-wide error type

pub mod chain;
pub mod contract;
pub mod error;

pub use chain::*;
pub use contract::*;
pub use error::*;
