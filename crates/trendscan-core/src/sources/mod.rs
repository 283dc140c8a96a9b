//! Upstream sources and their failure classification.
//!
//! | Source | Failure policy |
//! |--------|----------------|
//! | [`TrendSource`] | degrade to an empty term list |
//! | [`PreopenMarketSource`] | empty list, treated as fatal by the pipeline |
//! | [`QuoteSource`] | per-symbol, quote becomes absent |

mod preopen;
mod quote;
mod trends;

use std::fmt::{Display, Formatter};

pub use preopen::PreopenMarketSource;
pub use quote::QuoteSource;
pub use trends::TrendSource;

use crate::http_client::HttpError;

/// Source-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// The request never produced a response.
    Transport,
    /// A response arrived with a non-success status.
    Status,
    /// The body could not be interpreted.
    Parse,
}

/// Structured source error, logged by the degrading `fetch` wrappers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn transport(source: &str, error: &HttpError) -> Self {
        Self {
            kind: SourceErrorKind::Transport,
            message: format!("{source} transport error: {}", error.message()),
        }
    }

    pub fn status(source: &str, status: u16) -> Self {
        Self {
            kind: SourceErrorKind::Status,
            message: format!("{source} returned status {status}"),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Parse,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Transport => "source.transport",
            SourceErrorKind::Status => "source.status",
            SourceErrorKind::Parse => "source.parse",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Reads any JSON value and keeps it only if it is a number.
///
/// Upstream payloads occasionally carry `"-"` or `null` where a number is
/// expected; those resolve to `None` instead of failing the whole document.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <Option<serde_json::Value> as serde::Deserialize>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(serde_json::Value::as_f64))
}

pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <Option<serde_json::Value> as serde::Deserialize>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => Some(text),
        _ => None,
    })
}
