//! Scanner - single-leg scan facade
//!
//! Wires the stages into one call: hard filters, term structure, regime
//! classification, composite scoring, stable ranking and truncation.

use tracing::debug;

use crate::core::{Chain, Contract};
use crate::vol::{classify, term_structure, Strategy};

use super::composite::score_contracts;
use super::config::{Normalization, ScanFilters, ScorerConfig};
use super::ScanReport;

/// Runs the full single-leg scan pipeline over a chain snapshot
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    pub filters: ScanFilters,
    pub scorer: ScorerConfig,
    pub normalization: Normalization,
}

impl Scanner {
    /// Scanner with default filters, the scan scorer profile and
    /// population-relative normalization
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filters(mut self, filters: ScanFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_scorer(mut self, scorer: ScorerConfig) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Scan a chain for one strategy.
    ///
    /// `iv_realized_ratio` is the externally computed implied/realized vol
    /// ratio; None falls back to the term-ratio sigmoid. Filter exhaustion
    /// yields an empty candidate list with context intact, never an error.
    pub fn scan(
        &self,
        chain: &Chain,
        strategy: Strategy,
        iv_realized_ratio: Option<f64>,
    ) -> ScanReport {
        let term = term_structure(chain);
        let regime = classify(term.ratio, iv_realized_ratio, strategy);

        let passed: Vec<&Contract> = chain
            .contracts
            .iter()
            .filter(|c| self.filters.accept(c, chain.spot))
            .collect();

        if passed.is_empty() {
            debug!(
                symbol = %chain.symbol,
                scanned = chain.len(),
                "no contracts passed hard filters"
            );
            return ScanReport {
                candidates: Vec::new(),
                term,
                regime,
                spot: chain.spot,
                scanned: chain.len(),
                passed: 0,
            };
        }

        let mut candidates = score_contracts(
            &passed,
            chain.spot,
            strategy,
            regime.adjustment,
            &self.scorer,
            &self.normalization,
        );

        // Stable sort: equal scores keep input order
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates.truncate(self.filters.max_results);

        ScanReport {
            passed: passed.len(),
            candidates,
            term,
            regime,
            spot: chain.spot,
            scanned: chain.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OptionType, RawRecord};
    use crate::scan::config::Baselines;
    use crate::vol::iv_at_dte;
    use chrono::{Duration, NaiveDate, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    fn record(strike: f64, flag: &str, dte: i64, iv: f64) -> RawRecord {
        RawRecord {
            symbol: None,
            option_type: Some(flag.to_string()),
            strike: Some(strike),
            expiration: Some(today() + Duration::days(dte)),
            bid: Some(1.0),
            ask: Some(1.05),
            delta: Some(if flag == "C" { 0.5 } else { -0.5 }),
            gamma: Some(0.03),
            theta: Some(-0.01),
            vega: Some(0.1),
            implied_vol: Some(iv),
            volume: Some(500),
            open_interest: Some(1000),
        }
    }

    /// Two DTE buckets (20d at 0.18 ATM, 40d at 0.22 ATM), spot 100, plus
    /// the long call the end-to-end scenario pins
    fn scenario_chain() -> Chain {
        let mut records = vec![
            record(100.0, "C", 20, 0.18),
            record(100.0, "P", 20, 0.18),
            record(100.0, "P", 40, 0.22),
        ];
        let mut call = record(100.0, "C", 40, 0.22);
        call.bid = Some(2.0);
        call.ask = Some(2.1);
        call.delta = Some(0.5);
        call.gamma = Some(0.05);
        call.theta = Some(-0.03);
        records.push(call);

        Chain::from_records("SPY", &records, 100.0, today(), Utc::now()).unwrap()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let chain = scenario_chain();

        // Interpolated 30d IV sits midway between the buckets
        let iv30 = iv_at_dte(&chain, 30).unwrap();
        assert!((iv30 - 0.20).abs() < 1e-12);

        // With fixed baselines and a neutral term structure (no 90d leg,
        // ratio 1.0), the sigmoid fallback contributes
        // (1 - (0.9 + 0.4*sigmoid(-1.2))) * 5 = +0.037049 to each raw score.
        let scanner = Scanner::new()
            .with_normalization(Normalization::Baseline(Baselines::default()));
        let report = scanner.scan(&chain, Strategy::Long, None);

        assert_eq!(report.scanned, 4);
        assert!(report.passed >= 2);
        assert_eq!(report.term.ratio, 1.0);

        // The 40d call: pinned raw 1.132876 plus the fallback adjustment
        // -> round(50 + 12.5 * 1.169925) = round(64.624) = 65
        let call = report
            .candidates
            .iter()
            .find(|c| {
                c.contract.option_type == OptionType::Call && c.contract.days_to_expiry == 40
            })
            .unwrap();
        assert_eq!(call.score, 65);
    }

    #[test]
    fn test_filter_exhaustion_keeps_context() {
        let chain = scenario_chain();
        let filters = ScanFilters {
            min_volume: 1_000_000,
            ..Default::default()
        };
        let report = Scanner::new()
            .with_filters(filters)
            .scan(&chain, Strategy::Long, None);

        assert!(report.candidates.is_empty());
        assert_eq!(report.scanned, 4);
        assert_eq!(report.passed, 0);
        assert_eq!(report.spot, 100.0);
    }

    #[test]
    fn test_ranked_descending_and_truncated() {
        let mut records = Vec::new();
        for i in 0..30 {
            let mut r = record(100.0 + i as f64 * 0.5, "C", 30, 0.20);
            r.delta = Some(0.55 - i as f64 * 0.01);
            records.push(r);
        }
        let chain = Chain::from_records("SPY", &records, 100.0, today(), Utc::now()).unwrap();

        let report = Scanner::new().scan(&chain, Strategy::Long, Some(1.0));
        assert!(report.candidates.len() <= 20);
        for pair in report.candidates.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_regime_flows_into_report() {
        let chain = scenario_chain();
        let report = Scanner::new().scan(&chain, Strategy::Long, Some(0.8));
        // ratio 1.0 with cheap vol: neither quadrant, linear blend
        // ((1-1.0)*5 + (1-0.8)*5)/2 = 0.5
        assert!((report.regime.adjustment - 0.5).abs() < 1e-12);
    }
}
