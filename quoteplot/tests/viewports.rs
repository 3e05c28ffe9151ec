use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use quoteplot::{LruViewportStore, PairKey, QuotePlot, TimeRange, ViewportEntry, ViewportWindow};
use quoteplot_mock::{MockSource, fixture_anchor};

fn gold() -> PairKey {
    PairKey::from_selectors("Tradeview", "XAUUSD", "Zeal Capital", "XAUUSDe")
}

fn fx() -> PairKey {
    PairKey::from_selectors("Tradeview", "EURUSD", "Zeal Capital", "EURUSDe")
}

fn builder() -> quoteplot::QuotePlotBuilder {
    QuotePlot::builder().with_source(Arc::new(MockSource::new()))
}

#[tokio::test]
async fn recorded_pan_survives_refreshes_until_reset() {
    let plot = builder().build().unwrap();
    let t = fixture_anchor();
    let panned = ViewportWindow::new(t - TimeDelta::seconds(90), t - TimeDelta::seconds(30));
    plot.record_pan(&gold(), panned).await;

    for _ in 0..2 {
        let update = plot.chart(&gold(), TimeRange::All).await.unwrap().applied().unwrap();
        assert_eq!(update.viewport, Some(panned));
    }

    // Switching pairs does not disturb the recorded window.
    let other = plot.chart(&fx(), TimeRange::All).await.unwrap().applied().unwrap();
    assert_ne!(other.viewport, Some(panned));

    assert_eq!(plot.reset_zoom(&gold()).await, Some(panned));
    let update = plot.chart(&gold(), TimeRange::All).await.unwrap().applied().unwrap();
    assert_eq!(update.viewport.unwrap().span(), TimeDelta::minutes(5));
}

#[tokio::test]
async fn configured_default_window() {
    let plot = builder().default_window(Duration::from_secs(30)).build().unwrap();
    let update = plot.chart(&gold(), TimeRange::All).await.unwrap().applied().unwrap();
    assert_eq!(update.viewport.unwrap().span(), TimeDelta::seconds(30));
}

#[tokio::test]
async fn bounded_capacity_evicts_oldest_pair() {
    let plot = builder().viewport_capacity(1).build().unwrap();
    let t = fixture_anchor();
    plot.record_pan(&gold(), ViewportWindow::new(t, t)).await;
    plot.record_pan(&fx(), ViewportWindow::new(t, t)).await;

    let entries = plot.export_viewports().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].key, fx());
}

#[tokio::test]
async fn explicit_store_wins_over_capacity() {
    let plot = builder()
        .viewport_capacity(1)
        .viewport_store(Box::new(LruViewportStore::new(4)))
        .build()
        .unwrap();
    let t = fixture_anchor();
    plot.record_pan(&gold(), ViewportWindow::new(t, t)).await;
    plot.record_pan(&fx(), ViewportWindow::new(t, t)).await;
    assert_eq!(plot.export_viewports().await.len(), 2);
}

#[tokio::test]
async fn viewports_round_trip_through_json() {
    let first = builder().build().unwrap();
    let t = fixture_anchor();
    let w = ViewportWindow::new(t - TimeDelta::minutes(2), t);
    first.record_pan(&gold(), w).await;
    let json = serde_json::to_string(&first.export_viewports().await).unwrap();

    let second = builder().build().unwrap();
    let entries: Vec<ViewportEntry> = serde_json::from_str(&json).unwrap();
    second.import_viewports(entries).await;

    let update = second.chart(&gold(), TimeRange::All).await.unwrap().applied().unwrap();
    assert_eq!(update.viewport, Some(w));
    assert_eq!(second.viewport(&gold(), &update.data.timeline).await, Some(w));
}
