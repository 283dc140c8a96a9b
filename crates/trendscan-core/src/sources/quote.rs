use serde::Deserialize;
use tracing::warn;

use crate::domain::{LiveQuote, Symbol};
use crate::http_client::{HttpClient, HttpRequest};
use crate::sources::{lenient_number, SourceError};

const QUOTE_TIMEOUT_MS: u64 = 12_000;

/// Per-symbol live quote endpoint.
#[derive(Debug, Clone)]
pub struct QuoteSource {
    url_prefix: String,
}

impl QuoteSource {
    pub fn new(url_prefix: impl Into<String>) -> Self {
        Self {
            url_prefix: url_prefix.into(),
        }
    }

    pub fn request_url(&self, symbol: &Symbol) -> String {
        format!("{}{}", self.url_prefix, urlencoding::encode(symbol.as_str()))
    }

    /// Fetches one quote; any failure is logged and yields an absent quote.
    pub async fn fetch(&self, transport: &dyn HttpClient, symbol: &Symbol) -> LiveQuote {
        match self.try_fetch(transport, symbol).await {
            Ok(quote) => quote,
            Err(error) => {
                warn!(%symbol, %error, "live quote unavailable");
                LiveQuote::absent()
            }
        }
    }

    pub async fn try_fetch(
        &self,
        transport: &dyn HttpClient,
        symbol: &Symbol,
    ) -> Result<LiveQuote, SourceError> {
        let request = HttpRequest::get(self.request_url(symbol))
            .with_browser_headers()
            .with_timeout_ms(QUOTE_TIMEOUT_MS);
        let response = transport
            .execute(request)
            .await
            .map_err(|error| SourceError::transport("quote", &error))?;

        if !response.is_success() {
            return Err(SourceError::status("quote", response.status));
        }
        if response.body.is_empty() {
            return Err(SourceError::parse("quote returned an empty body"));
        }

        parse_quote(&response.body)
    }
}

/// Extracts last price and traded volume.
///
/// Last price comes from `priceInfo.lastPrice`. Volume prefers
/// `metadata.totalTradedVolume` and falls back to
/// `priceInfo.totalTradedVolume` when the former is missing or zero.
pub(crate) fn parse_quote(body: &str) -> Result<LiveQuote, SourceError> {
    let payload: QuotePayload = serde_json::from_str(body)
        .map_err(|e| SourceError::parse(format!("failed to parse quote response: {e}")))?;

    let price_info = payload.price_info.unwrap_or_default();
    let metadata = payload.metadata.unwrap_or_default();

    let volume = metadata
        .total_traded_volume
        .filter(|volume| *volume != 0.0)
        .or(price_info.total_traded_volume)
        .and_then(to_volume);

    Ok(LiveQuote::new(
        price_info.last_price.filter(|price| price.is_finite()),
        volume,
    ))
}

fn to_volume(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0).then(|| value.round() as u64)
}

#[derive(Debug, Deserialize)]
struct QuotePayload {
    #[serde(rename = "priceInfo", default)]
    price_info: Option<QuotePriceInfo>,
    #[serde(default)]
    metadata: Option<QuoteMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct QuotePriceInfo {
    #[serde(rename = "lastPrice", default, deserialize_with = "lenient_number")]
    last_price: Option<f64>,
    #[serde(rename = "totalTradedVolume", default, deserialize_with = "lenient_number")]
    total_traded_volume: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteMetadata {
    #[serde(rename = "totalTradedVolume", default, deserialize_with = "lenient_number")]
    total_traded_volume: Option<f64>,
}
