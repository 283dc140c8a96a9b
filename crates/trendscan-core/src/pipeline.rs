//! End-to-end run: trends, pre-open ranking, correlation, live quotes, report.

use std::sync::Arc;

use tracing::{error, info};

use crate::clock::Clock;
use crate::config::PipelineConfig;
use crate::correlate::Correlator;
use crate::domain::UtcDateTime;
use crate::http_client::HttpClient;
use crate::poller::ScheduledQuotePoller;
use crate::report::{ReportAssembler, Snapshot, NO_PREOPEN_DATA};
use crate::sources::{PreopenMarketSource, QuoteSource, TrendSource};

/// Strictly sequential pipeline over one shared exchange session.
pub struct Pipeline {
    config: PipelineConfig,
    clock: Arc<dyn Clock>,
    session: Arc<dyn HttpClient>,
    trends_client: Arc<dyn HttpClient>,
}

impl Pipeline {
    /// `session` carries cookie state across every exchange request; the
    /// trends feed uses the same client unless overridden.
    pub fn new(
        config: PipelineConfig,
        clock: Arc<dyn Clock>,
        session: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            config,
            clock,
            trends_client: session.clone(),
            session,
        }
    }

    pub fn with_trends_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.trends_client = client;
        self
    }

    /// Runs every stage and returns the snapshot to be written.
    ///
    /// An unavailable pre-open snapshot ends the run early with an
    /// error-flavored snapshot; no correlation or polling happens.
    pub async fn run(&self) -> Snapshot {
        let started_at = UtcDateTime::from_instant(self.clock.now_utc());
        info!(started_at = %started_at, "starting run");

        let trends = self.trend_source().fetch().await;
        let ranked = self.preopen_source().fetch(self.session.as_ref()).await;

        if ranked.is_empty() {
            error!("{NO_PREOPEN_DATA}; exiting early");
            return Snapshot::failed(started_at, NO_PREOPEN_DATA, trends);
        }

        let flags = Correlator::new(&trends).flags(&ranked);
        let quotes = self
            .poller()
            .poll(
                self.session.as_ref(),
                &ranked,
                self.config.fetch_live_quotes,
            )
            .await;

        ReportAssembler::new(self.clock.clone()).assemble(
            started_at,
            trends,
            &ranked,
            &flags,
            &quotes,
        )
    }

    fn trend_source(&self) -> TrendSource {
        TrendSource::new(
            self.trends_client.clone(),
            self.config.endpoints.trends_feed_url.as_str(),
            self.config.trends_region.as_str(),
        )
    }

    fn preopen_source(&self) -> PreopenMarketSource {
        PreopenMarketSource::new(
            self.clock.clone(),
            self.config.endpoints.site_root.as_str(),
            self.config.endpoints.preopen_url.as_str(),
            self.config.warmup_pause,
        )
    }

    fn poller(&self) -> ScheduledQuotePoller {
        ScheduledQuotePoller::new(
            self.clock.clone(),
            self.config.schedule,
            QuoteSource::new(self.config.endpoints.quote_url_prefix.as_str()),
            self.config.quote_spacing,
            self.config.live_quote_limit,
        )
    }
}
