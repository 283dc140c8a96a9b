//! Report assembly: joins ranked records, match flags and live quotes.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clock::Clock;
use crate::domain::{
    LiveQuote, LocalDateTime, PreopenRecord, ResultRecord, Symbol, TrendTerm, UtcDateTime,
};

/// Error text written when the pre-open snapshot is unavailable.
pub const NO_PREOPEN_DATA: &str = "No NSE pre-open data";

/// Output envelope for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Snapshot {
    Complete(CompleteSnapshot),
    Failed(FailedSnapshot),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteSnapshot {
    pub generated_at_utc: UtcDateTime,
    pub generated_at_ist: LocalDateTime,
    pub google_trends: Vec<TrendTerm>,
    pub results: Vec<ResultRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedSnapshot {
    pub generated_at: UtcDateTime,
    pub error: String,
    pub trends: Vec<TrendTerm>,
}

impl Snapshot {
    /// Early-exit envelope carrying whatever trend terms were gathered.
    pub fn failed(
        generated_at: UtcDateTime,
        error: impl Into<String>,
        trends: Vec<TrendTerm>,
    ) -> Self {
        Self::Failed(FailedSnapshot {
            generated_at,
            error: error.into(),
            trends,
        })
    }

    /// Result rows; empty for a failed run.
    pub fn results(&self) -> &[ResultRecord] {
        match self {
            Self::Complete(snapshot) => &snapshot.results,
            Self::Failed(_) => &[],
        }
    }

    pub fn trends(&self) -> &[TrendTerm] {
        match self {
            Self::Complete(snapshot) => &snapshot.google_trends,
            Self::Failed(snapshot) => &snapshot.trends,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Complete(_) => None,
            Self::Failed(snapshot) => Some(&snapshot.error),
        }
    }

    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

/// Terminal stage: builds the [`Snapshot`] from the earlier stages' output.
pub struct ReportAssembler {
    clock: Arc<dyn Clock>,
}

impl ReportAssembler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// One result row per ranked record, in ranking order.
    ///
    /// Records without an entry in `quotes` keep absent live fields; records
    /// without an entry in `match_flags` are unmatched.
    pub fn assemble(
        &self,
        started_at: UtcDateTime,
        trends: Vec<TrendTerm>,
        ranked: &[PreopenRecord],
        match_flags: &HashMap<Symbol, bool>,
        quotes: &[(Symbol, LiveQuote)],
    ) -> Snapshot {
        let quotes = quotes
            .iter()
            .map(|(symbol, quote)| (symbol, quote))
            .collect::<HashMap<_, _>>();

        let results = ranked
            .iter()
            .map(|record| {
                let matched = match_flags.get(&record.symbol).copied().unwrap_or(false);
                ResultRecord::new(record, matched, quotes.get(&record.symbol).copied())
            })
            .collect::<Vec<_>>();

        info!(
            records = results.len(),
            matched = results.iter().filter(|row| row.matched).count(),
            priced = results.iter().filter(|row| row.last_price.is_some()).count(),
            "assembled report"
        );

        Snapshot::Complete(CompleteSnapshot {
            generated_at_utc: started_at,
            generated_at_ist: UtcDateTime::from_instant(self.clock.now_utc()).to_local(),
            google_trends: trends,
            results,
        })
    }
}
