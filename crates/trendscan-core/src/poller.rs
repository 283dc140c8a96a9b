//! Timed, paced live-quote collection for the top-ranked symbols.

use std::slice;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::clock::Clock;
use crate::domain::{LiveQuote, PreopenRecord, Symbol};
use crate::http_client::HttpClient;
use crate::schedule::ScheduleTarget;
use crate::sources::QuoteSource;
use crate::throttling::QuoteThrottle;

/// Waits for the schedule target, then quotes the top records one by one.
pub struct ScheduledQuotePoller {
    clock: Arc<dyn Clock>,
    schedule: ScheduleTarget,
    quotes: QuoteSource,
    spacing: Duration,
    limit: usize,
}

impl ScheduledQuotePoller {
    pub fn new(
        clock: Arc<dyn Clock>,
        schedule: ScheduleTarget,
        quotes: QuoteSource,
        spacing: Duration,
        limit: usize,
    ) -> Self {
        Self {
            clock,
            schedule,
            quotes,
            spacing,
            limit,
        }
    }

    /// Returns one `(symbol, quote)` per eligible record, in rank order.
    ///
    /// When `enabled` is false nothing is fetched and nothing is returned.
    /// Only the first `limit` records (by position) are eligible.
    pub async fn poll(
        &self,
        transport: &dyn HttpClient,
        records: &[PreopenRecord],
        enabled: bool,
    ) -> Vec<(Symbol, LiveQuote)> {
        if !enabled {
            info!("live quotes disabled; skipping scheduled wait");
            return Vec::new();
        }

        self.wait_for_target().await;

        let eligible = &records[..records.len().min(self.limit)];
        info!(count = eligible.len(), "fetching live quotes for top symbols");

        let mut stream = self.stream(transport, eligible);
        let mut quotes = Vec::with_capacity(eligible.len());
        while let Some(entry) = stream.next().await {
            quotes.push(entry);
        }
        quotes
    }

    /// Single blocking wait until the target; returns the duration waited.
    pub async fn wait_for_target(&self) -> Duration {
        let now = self.clock.now_utc();
        let wait = self.schedule.wait_from(now);
        if wait.is_zero() {
            debug!("schedule target already passed; no wait");
        } else {
            info!(
                wait_secs = wait.as_secs(),
                target = %self.schedule.target_for(now),
                "waiting for live-quote window"
            );
            self.clock.sleep(wait).await;
        }
        wait
    }

    pub fn stream<'a>(
        &'a self,
        transport: &'a dyn HttpClient,
        records: &'a [PreopenRecord],
    ) -> LiveQuoteStream<'a> {
        LiveQuoteStream {
            transport,
            quotes: &self.quotes,
            records: records.iter(),
            throttle: QuoteThrottle::new(self.clock.clone(), self.spacing),
        }
    }
}

/// Sequential quote producer with a fixed pause after every request.
///
/// A failed fetch yields an absent quote; iteration always continues.
pub struct LiveQuoteStream<'a> {
    transport: &'a dyn HttpClient,
    quotes: &'a QuoteSource,
    records: slice::Iter<'a, PreopenRecord>,
    throttle: QuoteThrottle,
}

impl LiveQuoteStream<'_> {
    pub async fn next(&mut self) -> Option<(Symbol, LiveQuote)> {
        let record = self.records.next()?;
        self.throttle.until_ready().await;
        let quote = self.quotes.fetch(self.transport, &record.symbol).await;
        self.throttle.pause().await;
        Some((record.symbol.clone(), quote))
    }
}
