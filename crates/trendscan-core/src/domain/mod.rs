//! # Domain Models
//!
//! Canonical domain types shared by every pipeline stage.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TrendTerm`] | One trending search phrase |
//! | [`PreopenRecord`] | Pre-open snapshot with derived percentage change |
//! | [`LiveQuote`] | Optional last price and traded volume |
//! | [`ResultRecord`] | Final report row |
//! | [`Symbol`] | Validated exchange ticker |
//! | [`UtcDateTime`] / [`LocalDateTime`] | Report timestamps |
//!
//! Entities are produced by exactly one stage and read by later stages;
//! none are mutated after construction.

mod models;
mod symbol;
mod timestamp;

pub use models::{
    percent_change, percent_from_open, round2, LiveQuote, PreopenRecord, ResultRecord, TrendTerm,
};
pub use symbol::Symbol;
pub use timestamp::{LocalDateTime, UtcDateTime, IST_OFFSET};
