//! Pipeline and output configuration.
//!
//! Configuration is plain data passed into [`crate::Pipeline::new`] and
//! [`crate::ReportWriter::new`]; nothing is read from process globals.

use std::path::PathBuf;
use std::time::Duration;

use crate::http_client::NSE_ROOT;
use crate::schedule::ScheduleTarget;

/// Number of top-ranked symbols eligible for live quotes.
pub const DEFAULT_LIVE_QUOTE_LIMIT: usize = 200;

/// Upstream endpoint locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Warm-up target that sets session cookies.
    pub site_root: String,
    /// Full pre-open snapshot for all symbols.
    pub preopen_url: String,
    /// Per-symbol quote URL; the percent-encoded symbol is appended.
    pub quote_url_prefix: String,
    /// Trending-searches feed; `?geo=<region>` is appended.
    pub trends_feed_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            site_root: NSE_ROOT.to_owned(),
            preopen_url: format!("{NSE_ROOT}/api/market-data-pre-open?key=ALL"),
            quote_url_prefix: format!("{NSE_ROOT}/api/quote-equity?symbol="),
            trends_feed_url: String::from(
                "https://trends.google.com/trends/trendingsearches/daily/rss",
            ),
        }
    }
}

/// Settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Whether the scheduled wait and live-quote phase run at all.
    pub fetch_live_quotes: bool,
    pub live_quote_limit: usize,
    pub trends_region: String,
    pub schedule: ScheduleTarget,
    pub quote_spacing: Duration,
    pub warmup_pause: Duration,
    pub endpoints: Endpoints,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch_live_quotes: true,
            live_quote_limit: DEFAULT_LIVE_QUOTE_LIMIT,
            trends_region: String::from("IN"),
            schedule: ScheduleTarget::default(),
            quote_spacing: Duration::from_millis(600),
            warmup_pause: Duration::from_millis(1_200),
            endpoints: Endpoints::default(),
        }
    }
}

/// Where the two report files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub json_file: String,
    pub table_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
            json_file: String::from("trending.json"),
            table_file: String::from("trending_momentum_stocks.csv"),
        }
    }
}

impl OutputConfig {
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn json_path(&self) -> PathBuf {
        self.directory.join(&self.json_file)
    }

    pub fn table_path(&self) -> PathBuf {
        self.directory.join(&self.table_file)
    }
}
