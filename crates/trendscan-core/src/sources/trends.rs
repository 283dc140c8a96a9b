use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::{info, warn};

use crate::domain::TrendTerm;
use crate::http_client::{HttpClient, HttpRequest};
use crate::sources::SourceError;

const TRENDS_TIMEOUT_MS: u64 = 15_000;

/// Best-effort trending-search feed for one region.
#[derive(Clone)]
pub struct TrendSource {
    http_client: Arc<dyn HttpClient>,
    feed_url: String,
    region: String,
}

impl TrendSource {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        feed_url: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            feed_url: feed_url.into(),
            region: region.into(),
        }
    }

    pub fn request_url(&self) -> String {
        format!(
            "{}?geo={}",
            self.feed_url,
            urlencoding::encode(&self.region)
        )
    }

    /// Fetches trending terms; any failure is logged and yields no terms.
    pub async fn fetch(&self) -> Vec<TrendTerm> {
        match self.try_fetch().await {
            Ok(terms) => {
                info!(count = terms.len(), region = %self.region, "fetched trending terms");
                terms
            }
            Err(error) => {
                warn!(%error, "trending terms unavailable; continuing without them");
                Vec::new()
            }
        }
    }

    pub async fn try_fetch(&self) -> Result<Vec<TrendTerm>, SourceError> {
        let request = HttpRequest::get(self.request_url())
            .with_header("user-agent", "Mozilla/5.0")
            .with_timeout_ms(TRENDS_TIMEOUT_MS);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| SourceError::transport("trends feed", &error))?;

        if !response.is_success() {
            return Err(SourceError::status("trends feed", response.status));
        }
        if response.body.is_empty() {
            return Err(SourceError::parse("trends feed returned an empty body"));
        }

        Ok(parse_feed_titles(&response.body))
    }
}

/// Extracts `<title>` fragments, skipping the feed's own title.
pub(crate) fn parse_feed_titles(body: &str) -> Vec<TrendTerm> {
    title_pattern()
        .captures_iter(body)
        .skip(1)
        .filter_map(|captures| captures.get(1))
        .map(|fragment| TrendTerm::new(fragment.as_str().trim()))
        .collect()
}

fn title_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"<title>(.*?)</title>").expect("title pattern is a valid regex")
    })
}
