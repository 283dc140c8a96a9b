//! Shared fixtures for behavior tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use time::macros::datetime;
use time::OffsetDateTime;
use trendscan_core::{
    Endpoints, HttpClient, HttpError, HttpRequest, HttpResponse, ManualClock, PipelineConfig,
};

mod stub;

pub use stub::StubHttpClient;

pub const ROOT: &str = "https://exchange.test";
pub const PREOPEN: &str = "https://exchange.test/api/market-data-pre-open?key=ALL";
pub const QUOTE_PREFIX: &str = "https://exchange.test/api/quote-equity?symbol=";
pub const TRENDS: &str = "https://trends.test/rss";
pub const TRENDS_URL: &str = "https://trends.test/rss?geo=IN";

/// 09:10 IST, ten minutes before the live-quote window.
pub const BEFORE_WINDOW: OffsetDateTime = datetime!(2024-05-02 03:40:00 UTC);
/// 09:45 IST, well inside trading hours.
pub const AFTER_WINDOW: OffsetDateTime = datetime!(2024-05-02 04:15:00 UTC);

pub fn config(fetch_live_quotes: bool) -> PipelineConfig {
    PipelineConfig {
        fetch_live_quotes,
        endpoints: Endpoints {
            site_root: ROOT.to_owned(),
            preopen_url: PREOPEN.to_owned(),
            quote_url_prefix: QUOTE_PREFIX.to_owned(),
            trends_feed_url: TRENDS.to_owned(),
        },
        ..PipelineConfig::default()
    }
}

pub fn clock(start: OffsetDateTime) -> Arc<ManualClock> {
    Arc::new(ManualClock::new(start))
}

pub fn feed(terms: &[&str]) -> String {
    let items = terms
        .iter()
        .map(|term| format!("<item><title>{term}</title></item>"))
        .collect::<String>();
    format!("<rss><channel><title>Daily Search Trends</title>{items}</channel></rss>")
}

/// Pre-open document from `(symbol, previous close, indicative open)` rows.
pub fn preopen(rows: &[(&str, f64, f64)]) -> String {
    let data = rows
        .iter()
        .map(|(symbol, prev_close, iep)| {
            format!(
                r#"{{"metadata": {{"symbol": "{symbol}", "previousClose": {prev_close}, "iep": {iep}}}}}"#
            )
        })
        .collect::<Vec<_>>()
        .join(",");
    format!(r#"{{"data": [{data}]}}"#)
}

pub fn quote(last_price: f64, volume: u64) -> String {
    format!(
        r#"{{"priceInfo": {{"lastPrice": {last_price}}}, "metadata": {{"totalTradedVolume": {volume}}}}}"#
    )
}

pub fn quote_url(symbol: &str) -> String {
    format!("{QUOTE_PREFIX}{symbol}")
}

pub fn secs(value: u64) -> Duration {
    Duration::from_secs(value)
}
