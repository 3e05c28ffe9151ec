use std::time::Duration;

use chrono::TimeDelta;
use quoteplot_core::{DataRequest, PairKey, QuotePlotError, QuoteSource, TimeRange};
use quoteplot_mock::{MockSource, fixture_anchor, fixture_series};

fn gold() -> PairKey {
    PairKey::from_selectors("Tradeview", "XAUUSD", "Zeal Capital", "XAUUSDe")
}

#[tokio::test]
async fn returns_both_series_newest_first_within_limit() {
    let src = MockSource::new();
    let out = src
        .fetch(&DataRequest::new(gold(), TimeRange::All, 50))
        .await
        .unwrap();
    assert_eq!(out.len(), 50);
    assert!(out.windows(2).all(|w| w[0].ts >= w[1].ts));
    assert!(out.iter().any(|r| r.is_series(&gold().a)));
    assert!(out.iter().any(|r| r.is_series(&gold().b)));
    assert_eq!(out[0].ts, fixture_anchor());
}

#[tokio::test]
async fn time_range_is_relative_to_now() {
    let src = MockSource::new().with_now(fixture_anchor() + TimeDelta::minutes(55));
    let req = DataRequest::new(gold(), "1".parse().unwrap(), 10_000);
    let out = src.fetch(&req).await.unwrap();
    let cutoff = fixture_anchor() - TimeDelta::minutes(5);
    assert!(!out.is_empty());
    assert!(out.iter().all(|r| r.ts >= cutoff));
}

#[tokio::test]
async fn fixtures_have_bid_gaps() {
    let src = MockSource::new();
    let out = src
        .fetch(&DataRequest::new(gold(), TimeRange::All, 10_000))
        .await
        .unwrap();
    assert!(out.iter().any(|r| r.bid.is_none()));
    assert!(out.iter().all(|r| r.ask.is_some()));
    assert_eq!(fixture_series().len(), 4);
}

#[tokio::test]
async fn forced_failure() {
    let pair = PairKey::from_selectors("FAIL", "X", "Tradeview", "XAUUSD");
    let err = MockSource::new()
        .fetch(&DataRequest::new(pair, TimeRange::All, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, QuotePlotError::Source { .. }));
}

#[tokio::test(start_paused = true)]
async fn forced_latency_can_be_timed_out() {
    let pair = PairKey::from_selectors("TIMEOUT", "X", "Tradeview", "XAUUSD");
    let src = MockSource::new();
    let req = DataRequest::new(pair, TimeRange::All, 10);
    let res = tokio::time::timeout(Duration::from_millis(100), src.fetch(&req)).await;
    assert!(res.is_err());
}

#[tokio::test]
async fn range_older_than_the_calendar_keeps_everything() {
    let huge: TimeRange = "4294967295".parse().unwrap();
    let src = MockSource::new();
    let all = src
        .fetch(&DataRequest::new(gold(), TimeRange::All, 10_000))
        .await
        .unwrap();
    let out = src.fetch(&DataRequest::new(gold(), huge, 10_000)).await.unwrap();
    assert_eq!(out, all);
}
