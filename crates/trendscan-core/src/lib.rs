//! # Trendscan Core
//!
//! Daily snapshot correlating trending search phrases with pre-open equity
//! moves, optionally enriched with live trade prices captured at a fixed
//! wall-clock moment.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────┐
//! │ TrendSource  │   │ PreopenMarketSource  │
//! └──────┬───────┘   └──────────┬───────────┘
//!        │                      │ ranked records (empty => early exit)
//!        ▼                      ▼
//!      ┌───────────────────────────┐
//!      │ Correlator                │
//!      └─────────────┬─────────────┘
//!                    │ top N
//!                    ▼
//!      ┌───────────────────────────┐     ┌─────────┐
//!      │ ScheduledQuotePoller      │────▶│ Clock   │
//!      └─────────────┬─────────────┘     └─────────┘
//!                    ▼
//!      ┌───────────────────────────┐
//!      │ ReportAssembler           │──▶ JSON + CSV
//!      └───────────────────────────┘
//! ```
//!
//! ## Failure policies
//!
//! | Stage | On failure |
//! |-------|------------|
//! | trends | empty terms, every symbol unmatched |
//! | pre-open | error snapshot, run ends early |
//! | live quote | that symbol's quote is absent |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use trendscan_core::{Pipeline, PipelineConfig, ReqwestHttpClient, SystemClock};
//!
//! let session = Arc::new(ReqwestHttpClient::new()?);
//! let snapshot = Pipeline::new(PipelineConfig::default(), Arc::new(SystemClock), session)
//!     .run()
//!     .await;
//! ```

pub mod clock;
pub mod config;
pub mod correlate;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod output;
pub mod pipeline;
pub mod poller;
pub mod report;
pub mod schedule;
pub mod sources;
pub mod throttling;

#[cfg(test)]
mod test_support;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Endpoints, OutputConfig, PipelineConfig, DEFAULT_LIVE_QUOTE_LIMIT};
pub use correlate::{is_matched, Correlator};
pub use domain::{
    LiveQuote, LocalDateTime, PreopenRecord, ResultRecord, Symbol, TrendTerm, UtcDateTime,
    IST_OFFSET,
};
pub use error::{CoreError, ValidationError};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use output::{ReportWriter, WrittenReport};
pub use pipeline::Pipeline;
pub use poller::{LiveQuoteStream, ScheduledQuotePoller};
pub use report::{CompleteSnapshot, FailedSnapshot, ReportAssembler, Snapshot, NO_PREOPEN_DATA};
pub use schedule::ScheduleTarget;
pub use sources::{
    PreopenMarketSource, QuoteSource, SourceError, SourceErrorKind, TrendSource,
};
pub use throttling::QuoteThrottle;
