//! Option chain snapshot and normalizer
//!
//! Turns raw per-contract records from a market-data collaborator into a
//! uniform `Chain`. Normalization is fail-soft per record and fail-loud only
//! when the entire chain is unusable. No filtering happens here beyond
//! dropping malformed records; strike/DTE/liquidity filters belong to the
//! scan and spread stages.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::contract::{Contract, OptionType, RawRecord};
use super::error::{ScanError, ScanResult};

/// A snapshot of one underlying's option chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chain {
    /// Underlying symbol
    pub symbol: String,
    /// Spot price at snapshot time (> 0)
    pub spot: f64,
    /// Snapshot timestamp
    pub as_of: DateTime<Utc>,
    /// All normalized contracts, in input order
    pub contracts: Vec<Contract>,
}

impl Chain {
    /// Normalize raw records into a chain.
    ///
    /// `today` is supplied by the caller so days-to-expiry is deterministic
    /// and testable; the core never reads the wall clock. Malformed records
    /// are dropped individually. A non-empty input that yields zero usable
    /// contracts is an error; an empty input yields an empty chain (the
    /// scan then reports filter exhaustion rather than failing).
    pub fn from_records(
        symbol: impl Into<String>,
        records: &[RawRecord],
        spot: f64,
        today: NaiveDate,
        as_of: DateTime<Utc>,
    ) -> ScanResult<Self> {
        if !spot.is_finite() || spot <= 0.0 {
            return Err(ScanError::invalid_input(format!(
                "spot price must be positive, got {spot}"
            )));
        }

        let symbol = symbol.into();
        let mut contracts = Vec::with_capacity(records.len());
        let mut dropped = 0usize;

        for record in records {
            match record.normalize(today) {
                Some(contract) => contracts.push(contract),
                None => {
                    dropped += 1;
                    debug!(
                        symbol = %symbol,
                        record_symbol = record.symbol.as_deref().unwrap_or("?"),
                        "dropping malformed contract record"
                    );
                }
            }
        }

        if contracts.is_empty() && !records.is_empty() {
            return Err(ScanError::unusable_chain(format!(
                "{symbol}: all {dropped} records malformed"
            )));
        }

        Ok(Self {
            symbol,
            spot,
            as_of,
            contracts,
        })
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Distinct days-to-expiry values present, sorted ascending
    pub fn dte_buckets(&self) -> Vec<i64> {
        let mut buckets: Vec<i64> = self.contracts.iter().map(|c| c.days_to_expiry).collect();
        buckets.sort_unstable();
        buckets.dedup();
        buckets
    }

    /// Contracts at an exact days-to-expiry bucket
    pub fn at_dte(&self, dte: i64) -> Vec<&Contract> {
        self.contracts
            .iter()
            .filter(|c| c.days_to_expiry == dte)
            .collect()
    }

    /// Contracts of one type at one expiration, the slice spread builders
    /// pair legs within
    pub fn slice(&self, option_type: OptionType, expiration: NaiveDate) -> Vec<&Contract> {
        self.contracts
            .iter()
            .filter(|c| c.option_type == option_type && c.expiration == expiration)
            .collect()
    }

    /// Distinct expirations present, sorted ascending
    pub fn expirations(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.contracts.iter().map(|c| c.expiration).collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }

    pub fn calls(&self) -> Vec<&Contract> {
        self.contracts
            .iter()
            .filter(|c| c.option_type == OptionType::Call)
            .collect()
    }

    pub fn puts(&self) -> Vec<&Contract> {
        self.contracts
            .iter()
            .filter(|c| c.option_type == OptionType::Put)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(strike: f64, flag: &str, expiration: NaiveDate) -> RawRecord {
        RawRecord {
            option_type: Some(flag.to_string()),
            strike: Some(strike),
            expiration: Some(expiration),
            bid: Some(1.0),
            ask: Some(1.1),
            implied_vol: Some(0.2),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    #[test]
    fn test_malformed_record_is_dropped_not_fatal() {
        let expiry = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let mut bad = record(100.0, "C", expiry);
        bad.strike = Some(f64::NAN);
        let records = vec![record(100.0, "C", expiry), bad, record(100.0, "P", expiry)];

        let chain = Chain::from_records("SPY", &records, 100.0, today(), Utc::now()).unwrap();
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_entirely_unusable_chain_is_an_error() {
        let mut bad = RawRecord::default();
        bad.strike = Some(-1.0);
        let err = Chain::from_records("SPY", &[bad], 100.0, today(), Utc::now());
        assert!(matches!(err, Err(ScanError::UnusableChain(_))));
    }

    #[test]
    fn test_empty_input_yields_empty_chain() {
        let chain = Chain::from_records("SPY", &[], 100.0, today(), Utc::now()).unwrap();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_non_positive_spot_rejected() {
        let err = Chain::from_records("SPY", &[], 0.0, today(), Utc::now());
        assert!(matches!(err, Err(ScanError::InvalidInput(_))));
    }

    #[test]
    fn test_dte_buckets_sorted_distinct() {
        let e1 = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(); // 43d
        let e2 = NaiveDate::from_ymd_opt(2024, 2, 16).unwrap(); // 15d
        let records = vec![
            record(100.0, "C", e1),
            record(100.0, "P", e1),
            record(95.0, "P", e2),
            record(105.0, "C", e2),
        ];
        let chain = Chain::from_records("SPY", &records, 100.0, today(), Utc::now()).unwrap();

        assert_eq!(chain.dte_buckets(), vec![15, 43]);
        assert_eq!(chain.at_dte(15).len(), 2);
        assert_eq!(chain.calls().len(), 2);
        assert_eq!(chain.puts().len(), 2);
    }
}
