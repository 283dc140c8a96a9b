use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Symbol, ValidationError};

/// One trending search phrase, kept verbatim in source rank order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrendTerm(String);

impl TrendTerm {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TrendTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pre-open session snapshot for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PreopenRecord {
    pub symbol: Symbol,
    pub prev_close: f64,
    pub open_price: f64,
    pub percent_change_pre_open: f64,
}

impl PreopenRecord {
    /// Builds a record and derives the pre-open percentage change.
    ///
    /// `prev_close` must be finite and strictly positive.
    pub fn new(symbol: Symbol, prev_close: f64, open_price: f64) -> Result<Self, ValidationError> {
        validate_finite("prev_close", prev_close)?;
        validate_finite("open_price", open_price)?;
        if prev_close <= 0.0 {
            return Err(ValidationError::NonPositiveValue {
                field: "prev_close",
            });
        }

        Ok(Self {
            symbol,
            prev_close,
            open_price,
            percent_change_pre_open: percent_change(prev_close, open_price),
        })
    }
}

/// Live trade snapshot; each field is independently optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LiveQuote {
    pub last_price: Option<f64>,
    pub volume: Option<u64>,
}

impl LiveQuote {
    pub const fn new(last_price: Option<f64>, volume: Option<u64>) -> Self {
        Self { last_price, volume }
    }

    pub const fn absent() -> Self {
        Self::new(None, None)
    }

    pub const fn is_absent(&self) -> bool {
        self.last_price.is_none() && self.volume.is_none()
    }
}

/// Final report row: pre-open data joined with match flag and live quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultRecord {
    pub symbol: Symbol,
    pub prev_close: f64,
    pub open_price: f64,
    pub percent_change_pre_open: f64,
    pub matched: bool,
    pub last_price: Option<f64>,
    pub volume: Option<u64>,
    pub percent_from_open: Option<f64>,
}

impl ResultRecord {
    /// Tabular column names, in serialization order.
    pub const COLUMNS: [&'static str; 8] = [
        "Symbol",
        "PrevClose",
        "OpenPrice",
        "PercentChangePreOpen",
        "Matched",
        "LastPrice",
        "Volume",
        "PercentFromOpen",
    ];

    pub fn new(record: &PreopenRecord, matched: bool, quote: Option<&LiveQuote>) -> Self {
        let quote = quote.copied().unwrap_or_default();
        Self {
            symbol: record.symbol.clone(),
            prev_close: record.prev_close,
            open_price: record.open_price,
            percent_change_pre_open: record.percent_change_pre_open,
            matched,
            last_price: quote.last_price,
            volume: quote.volume,
            percent_from_open: percent_from_open(quote.last_price, Some(record.open_price)),
        }
    }
}

/// `(to - from) / from * 100`, rounded to two decimals.
pub fn percent_change(from: f64, to: f64) -> f64 {
    round2((to - from) / from * 100.0)
}

/// Move from the indicative open to the last traded price.
///
/// Absent unless both prices exist and the open is a usable divisor.
pub fn percent_from_open(last_price: Option<f64>, open_price: Option<f64>) -> Option<f64> {
    let last = last_price.filter(|value| value.is_finite())?;
    let open = open_price.filter(|value| value.is_finite() && *value > 0.0)?;
    Some(percent_change(open, last))
}

/// Two-decimal rounding with exact halves going to the even neighbour.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}
