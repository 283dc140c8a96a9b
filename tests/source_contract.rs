//! Contracts of the three upstream sources and the lexical correlator,
//! exercised through the public API against a stub transport.

mod support;

use std::sync::Arc;
use std::time::Duration;

use support::*;
use trendscan_core::{
    is_matched, HttpResponse, LiveQuote, PreopenMarketSource, QuoteSource, SourceErrorKind,
    Symbol, TrendSource, TrendTerm,
};

fn preopen_source(clock: Arc<trendscan_core::ManualClock>) -> PreopenMarketSource {
    PreopenMarketSource::new(clock, ROOT, PREOPEN, Duration::from_millis(1_200))
}

fn symbol(raw: &str) -> Symbol {
    Symbol::parse(raw).expect("valid symbol")
}

// =============================================================================
// Trends feed
// =============================================================================

#[tokio::test]
async fn trends_skip_feed_title_and_trim_terms() {
    let body = "<rss><title>Daily Search Trends</title>\
                <item><title>  IPL final </title></item>\
                <item><title>reliance agm</title></item></rss>";
    let client = Arc::new(StubHttpClient::default().ok(TRENDS_URL, body));

    let terms = TrendSource::new(client.clone(), TRENDS, "IN")
        .try_fetch()
        .await
        .expect("feed parses");

    assert_eq!(terms, vec![TrendTerm::new("IPL final"), TrendTerm::new("reliance agm")]);
    assert_eq!(client.requested_urls(), vec![TRENDS_URL.to_owned()]);
}

#[tokio::test]
async fn trends_degrade_to_empty_on_status_and_empty_body() {
    let failing = Arc::new(
        StubHttpClient::default().route(TRENDS_URL, Ok(HttpResponse::new(503, "busy"))),
    );
    let source = TrendSource::new(failing, TRENDS, "IN");
    let error = source.try_fetch().await.expect_err("status should fail");
    assert_eq!(error.kind(), SourceErrorKind::Status);
    assert!(source.fetch().await.is_empty());

    let empty = Arc::new(StubHttpClient::default().ok(TRENDS_URL, ""));
    let source = TrendSource::new(empty, TRENDS, "IN");
    let error = source.try_fetch().await.expect_err("empty body should fail");
    assert_eq!(error.kind(), SourceErrorKind::Parse);
    assert!(source.fetch().await.is_empty());
}

#[tokio::test]
async fn trends_region_is_part_of_the_request() {
    let client = Arc::new(StubHttpClient::default());
    let source = TrendSource::new(client, TRENDS, "US");

    assert_eq!(source.request_url(), "https://trends.test/rss?geo=US");
}

// =============================================================================
// Pre-open snapshot
// =============================================================================

#[tokio::test]
async fn preopen_ranks_by_descending_change_and_keeps_tie_order() {
    let client = StubHttpClient::default().ok(ROOT, "").ok(
        PREOPEN,
        preopen(&[
            ("LOW", 100.0, 99.0),
            ("TIEA", 200.0, 204.0),
            ("HIGH", 50.0, 55.0),
            ("TIEB", 100.0, 102.0),
        ]),
    );

    let records = preopen_source(clock(AFTER_WINDOW))
        .try_fetch(&client)
        .await
        .expect("pre-open parses");

    let order = records
        .iter()
        .map(|record| record.symbol.as_str())
        .collect::<Vec<_>>();
    assert_eq!(order, vec!["HIGH", "TIEA", "TIEB", "LOW"]);
    assert_eq!(records[0].percent_change_pre_open, 10.0);
    assert_eq!(records[3].percent_change_pre_open, -1.0);
}

#[tokio::test]
async fn preopen_skips_entries_missing_usable_fields() {
    let body = r#"{"data": [
        {"metadata": {"symbol": "GOOD", "previousClose": 100, "iep": 101}},
        {"metadata": {"symbol": "ZEROPREV", "previousClose": 0, "iep": 101}},
        {"metadata": {"symbol": "NOIEP", "previousClose": 100, "iep": 0}},
        {"metadata": {"symbol": "DASH", "previousClose": "-", "iep": 101}},
        {"metadata": {"previousClose": 100, "iep": 101}},
        {"detail": "no metadata"}
    ]}"#;
    let client = StubHttpClient::default().ok(ROOT, "").ok(PREOPEN, body);

    let records = preopen_source(clock(AFTER_WINDOW))
        .try_fetch(&client)
        .await
        .expect("pre-open parses");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].symbol.as_str(), "GOOD");
}

#[tokio::test]
async fn preopen_warms_session_and_pauses_before_data_call() {
    let clock = clock(AFTER_WINDOW);
    let client = StubHttpClient::default()
        .ok(ROOT, "")
        .ok(PREOPEN, preopen(&[("ABC", 100.0, 101.0)]));

    preopen_source(clock.clone())
        .try_fetch(&client)
        .await
        .expect("pre-open parses");

    assert_eq!(client.requested_urls(), vec![ROOT.to_owned(), PREOPEN.to_owned()]);
    assert_eq!(clock.sleeps(), vec![Duration::from_millis(1_200)]);
}

#[tokio::test]
async fn preopen_failures_are_classified() {
    let warmup_down = StubHttpClient::default().fail(ROOT, "connection refused");
    let error = preopen_source(clock(AFTER_WINDOW))
        .try_fetch(&warmup_down)
        .await
        .expect_err("warm-up failure is fatal");
    assert_eq!(error.kind(), SourceErrorKind::Transport);

    let garbled = StubHttpClient::default().ok(ROOT, "").ok(PREOPEN, "<html>");
    let source = preopen_source(clock(AFTER_WINDOW));
    let error = source.try_fetch(&garbled).await.expect_err("html is not json");
    assert_eq!(error.kind(), SourceErrorKind::Parse);
    assert!(source.fetch(&garbled).await.is_empty());
}

// =============================================================================
// Live quotes
// =============================================================================

#[tokio::test]
async fn quote_volume_falls_back_to_price_info() {
    let body = r#"{
        "priceInfo": {"lastPrice": 250.5, "totalTradedVolume": 900},
        "metadata": {"totalTradedVolume": 0}
    }"#;
    let client = StubHttpClient::default().ok(quote_url("ABC"), body);

    let quote = QuoteSource::new(QUOTE_PREFIX)
        .try_fetch(&client, &symbol("ABC"))
        .await
        .expect("quote parses");

    assert_eq!(quote, LiveQuote::new(Some(250.5), Some(900)));
}

#[tokio::test]
async fn quote_without_price_keeps_volume_only() {
    let body = r#"{"priceInfo": {}, "metadata": {"totalTradedVolume": 42}}"#;
    let client = StubHttpClient::default().ok(quote_url("ABC"), body);

    let quote = QuoteSource::new(QUOTE_PREFIX)
        .fetch(&client, &symbol("ABC"))
        .await;

    assert_eq!(quote, LiveQuote::new(None, Some(42)));
}

#[tokio::test]
async fn quote_failures_yield_absent_quote() {
    let source = QuoteSource::new(QUOTE_PREFIX);
    let client = StubHttpClient::default()
        .ok(quote_url("EMPTY"), "")
        .fail(quote_url("DOWN"), "timed out");

    assert!(source.fetch(&client, &symbol("EMPTY")).await.is_absent());
    assert!(source.fetch(&client, &symbol("DOWN")).await.is_absent());
    assert!(source.fetch(&client, &symbol("MISSING")).await.is_absent());
}

#[test]
fn quote_url_escapes_reserved_characters() {
    let source = QuoteSource::new(QUOTE_PREFIX);

    assert_eq!(
        source.request_url(&symbol("M&M")),
        "https://exchange.test/api/quote-equity?symbol=M%26M"
    );
}

// =============================================================================
// Correlation
// =============================================================================

#[test]
fn match_is_case_insensitive_substring() {
    let terms = vec![TrendTerm::new("Tata Motors shares"), TrendTerm::new("INFY Q4 results")];

    assert!(is_matched(&symbol("INFY"), &terms));
    assert!(is_matched(&symbol("TATA"), &terms));
    assert!(!is_matched(&symbol("TATAMOTORS"), &terms));
    assert!(!is_matched(&symbol("INFY"), &[]));
}
