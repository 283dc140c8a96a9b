//! Lexical correlation between tickers and trending phrases.
//!
//! A symbol matches when its lowercase form is a substring of at least one
//! lowercase trend term. Coincidental substrings and company names that
//! differ from the ticker are not handled.

use std::collections::HashMap;

use crate::domain::{PreopenRecord, Symbol, TrendTerm};

/// Lowercased view of the trend terms, built once per run.
#[derive(Debug, Clone, Default)]
pub struct Correlator {
    terms: Vec<String>,
}

impl Correlator {
    pub fn new(terms: &[TrendTerm]) -> Self {
        Self {
            terms: terms.iter().map(|term| term.as_str().to_lowercase()).collect(),
        }
    }

    pub fn is_matched(&self, symbol: &Symbol) -> bool {
        let needle = symbol.to_lowercase();
        self.terms.iter().any(|term| term.contains(&needle))
    }

    /// Match flag for every record, keyed by symbol.
    pub fn flags(&self, records: &[PreopenRecord]) -> HashMap<Symbol, bool> {
        records
            .iter()
            .map(|record| (record.symbol.clone(), self.is_matched(&record.symbol)))
            .collect()
    }
}

pub fn is_matched(symbol: &Symbol, terms: &[TrendTerm]) -> bool {
    Correlator::new(terms).is_matched(symbol)
}
