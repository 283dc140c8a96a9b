//! CLI argument definitions for trendscan.
//!
//! # Examples
//!
//! ```bash
//! # Scheduled run: waits for 09:20 IST, then fetches live quotes
//! trendscan
//!
//! # Pre-open ranking only, written to ./out
//! trendscan --no-live-quotes --output-dir out
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use trendscan_core::{OutputConfig, PipelineConfig, DEFAULT_LIVE_QUOTE_LIMIT};

/// Trending-search vs pre-open mover snapshot.
#[derive(Debug, Parser)]
#[command(
    name = "trendscan",
    version,
    about = "Correlate trending searches with pre-open movers and capture live quotes"
)]
pub struct Cli {
    /// Skip the scheduled wait and the live-quote phase entirely.
    #[arg(long, default_value_t = false)]
    pub no_live_quotes: bool,

    /// Number of top-ranked symbols to fetch live quotes for.
    #[arg(long, default_value_t = DEFAULT_LIVE_QUOTE_LIMIT)]
    pub top: usize,

    /// Region code for the trending-searches feed.
    #[arg(long, default_value = "IN")]
    pub region: String,

    /// Directory that receives the JSON and CSV reports.
    #[arg(long, default_value = "data")]
    pub output_dir: PathBuf,

    /// Pause taken after each live-quote request, in milliseconds.
    #[arg(long, default_value_t = 600)]
    pub quote_spacing_ms: u64,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            fetch_live_quotes: !self.no_live_quotes,
            live_quote_limit: self.top,
            trends_region: self.region.clone(),
            quote_spacing: Duration::from_millis(self.quote_spacing_ms),
            ..PipelineConfig::default()
        }
    }

    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::default().with_directory(&self.output_dir)
    }
}
