use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::domain::{PreopenRecord, Symbol};
use crate::http_client::{HttpClient, HttpRequest};
use crate::sources::{lenient_number, lenient_string, SourceError};

const WARMUP_TIMEOUT_MS: u64 = 10_000;
const PREOPEN_TIMEOUT_MS: u64 = 15_000;

/// Pre-open snapshot of every tradable symbol, ranked by percentage move.
#[derive(Clone)]
pub struct PreopenMarketSource {
    clock: Arc<dyn Clock>,
    site_root: String,
    preopen_url: String,
    warmup_pause: Duration,
}

impl PreopenMarketSource {
    pub fn new(
        clock: Arc<dyn Clock>,
        site_root: impl Into<String>,
        preopen_url: impl Into<String>,
        warmup_pause: Duration,
    ) -> Self {
        Self {
            clock,
            site_root: site_root.into(),
            preopen_url: preopen_url.into(),
            warmup_pause,
        }
    }

    /// Fetches and ranks pre-open records; any failure yields an empty list.
    pub async fn fetch(&self, transport: &dyn HttpClient) -> Vec<PreopenRecord> {
        match self.try_fetch(transport).await {
            Ok(records) => {
                info!(count = records.len(), "fetched pre-open records");
                records
            }
            Err(error) => {
                error!(%error, "pre-open snapshot unavailable");
                Vec::new()
            }
        }
    }

    /// Warm-up call for session cookies, a short pause, then the data call.
    pub async fn try_fetch(
        &self,
        transport: &dyn HttpClient,
    ) -> Result<Vec<PreopenRecord>, SourceError> {
        let warmup = HttpRequest::get(self.site_root.as_str())
            .with_browser_headers()
            .with_timeout_ms(WARMUP_TIMEOUT_MS);
        let warmup_response = transport
            .execute(warmup)
            .await
            .map_err(|error| SourceError::transport("exchange warm-up", &error))?;
        debug!(status = warmup_response.status, "session warm-up complete");

        self.clock.sleep(self.warmup_pause).await;

        let request = HttpRequest::get(self.preopen_url.as_str())
            .with_browser_headers()
            .with_timeout_ms(PREOPEN_TIMEOUT_MS);
        let response = transport
            .execute(request)
            .await
            .map_err(|error| SourceError::transport("pre-open", &error))?;

        if !response.is_success() {
            return Err(SourceError::status("pre-open", response.status));
        }

        parse_preopen(&response.body)
    }
}

/// Parses the pre-open document into records sorted by descending move.
///
/// Entries without a symbol, without a positive previous close or without a
/// non-zero indicative open are skipped. Ties keep source order.
pub(crate) fn parse_preopen(body: &str) -> Result<Vec<PreopenRecord>, SourceError> {
    let payload: PreopenPayload = serde_json::from_str(body)
        .map_err(|e| SourceError::parse(format!("failed to parse pre-open response: {e}")))?;

    let mut records = payload
        .data
        .into_iter()
        .filter_map(|item| item.metadata)
        .filter_map(|metadata| {
            let raw_symbol = metadata.symbol.filter(|symbol| !symbol.is_empty())?;
            let prev_close = metadata.previous_close.filter(|value| *value > 0.0)?;
            let open_price = metadata.iep.filter(|value| *value != 0.0)?;

            let record = Symbol::parse(&raw_symbol)
                .and_then(|symbol| PreopenRecord::new(symbol, prev_close, open_price));
            match record {
                Ok(record) => Some(record),
                Err(error) => {
                    warn!(symbol = %raw_symbol, %error, "dropping priced pre-open entry");
                    None
                }
            }
        })
        .collect::<Vec<_>>();

    records.sort_by(|left, right| {
        right
            .percent_change_pre_open
            .total_cmp(&left.percent_change_pre_open)
    });

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct PreopenPayload {
    #[serde(default)]
    data: Vec<PreopenItem>,
}

#[derive(Debug, Deserialize)]
struct PreopenItem {
    #[serde(default)]
    metadata: Option<PreopenMetadata>,
}

#[derive(Debug, Deserialize)]
struct PreopenMetadata {
    #[serde(default, deserialize_with = "lenient_string")]
    symbol: Option<String>,
    #[serde(rename = "previousClose", default, deserialize_with = "lenient_number")]
    previous_close: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    iep: Option<f64>,
}
