use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quoteplot::{
    Axis, DataRequest, DisplayMode, PairKey, QuotePlot, QuotePlotError, QuoteRecord, QuoteSource,
    TimeRange, ViewportWindow, WireBatch,
};
use quoteplot_mock::{MockSource, fixture_anchor};

/// Source that answers every request with one decoded JSON payload.
struct JsonSource(&'static str);

#[async_trait]
impl QuoteSource for JsonSource {
    fn name(&self) -> &'static str {
        "json"
    }

    async fn fetch(&self, _req: &DataRequest) -> Result<Vec<QuoteRecord>, QuotePlotError> {
        let batch: WireBatch =
            serde_json::from_str(self.0).map_err(|e| QuotePlotError::source("json", e.to_string()))?;
        batch.into_records()
    }
}

fn gold() -> PairKey {
    PairKey::from_selectors("Tradeview", "XAUUSD", "Zeal Capital", "XAUUSDe")
}

fn plot() -> QuotePlot {
    QuotePlot::builder()
        .with_source(Arc::new(MockSource::new()))
        .build()
        .unwrap()
}

#[test]
fn build_requires_a_source() {
    let err = QuotePlot::builder().build().err().unwrap();
    assert!(matches!(err, QuotePlotError::InvalidArg(_)));
}

#[test]
fn build_rejects_zero_fetch_limit() {
    let err = QuotePlot::builder()
        .with_source(Arc::new(MockSource::new()))
        .fetch_limit(0)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, QuotePlotError::InvalidArg(_)));
}

#[tokio::test]
async fn chart_applies_with_default_window() {
    let plot = plot();
    let update = plot
        .chart(&gold(), TimeRange::All)
        .await
        .unwrap()
        .applied()
        .unwrap();

    assert_eq!(update.frame.datasets.len(), 4);
    assert_eq!(update.frame.datasets[0].label, "Tradeview XAUUSD Ask");
    assert_eq!(update.frame.datasets[2].axis, Axis::Secondary);
    assert_eq!(update.frame.labels.len(), update.data.timeline.len());

    let last = *update.data.timeline.last().unwrap();
    let window = update.viewport.unwrap();
    assert_eq!(window.max, last);
    assert_eq!(window.span(), chrono::TimeDelta::minutes(5));
}

#[tokio::test]
async fn midline_mode_from_builder() {
    let plot = QuotePlot::builder()
        .with_source(Arc::new(MockSource::new()))
        .display_mode(DisplayMode::Midline)
        .build()
        .unwrap();
    let update = plot.chart(&gold(), TimeRange::All).await.unwrap().applied().unwrap();
    assert_eq!(update.frame.datasets.len(), 2);
    assert!(update.frame.datasets[0].label.ends_with("Midline"));
}

#[tokio::test]
async fn table_rows_default_and_override() {
    let plot = plot();
    let view = plot.table(&gold(), TimeRange::All, None).await.unwrap().applied().unwrap();
    assert_eq!(view.rows.len(), 10);
    assert!(view.rows[0].timestamp > view.rows[1].timestamp);
    assert_eq!(view.columns[3], "Zeal Capital XAUUSDe Ask");

    let short = plot.table(&gold(), TimeRange::All, Some(3)).await.unwrap().applied().unwrap();
    assert_eq!(short.rows.len(), 3);
}

#[tokio::test]
async fn time_range_narrows_the_timeline() {
    let plot = plot();
    let all = plot.chart(&gold(), TimeRange::All).await.unwrap().applied().unwrap();
    let future = MockSource::new().with_now(fixture_anchor() + chrono::TimeDelta::minutes(61));
    let late = QuotePlot::builder()
        .with_source(Arc::new(future))
        .build()
        .unwrap();
    let one_hour: TimeRange = "1".parse().unwrap();
    let narrowed = late.chart(&gold(), one_hour).await.unwrap().applied().unwrap();

    assert!(!all.data.is_empty());
    // Every fixture quote is more than an hour older than the shifted now.
    assert!(narrowed.data.is_empty());
    assert!(narrowed.frame.is_empty());
    assert_eq!(narrowed.viewport, None);
}

#[tokio::test]
async fn unknown_pair_renders_no_data() {
    let plot = plot();
    let pair = PairKey::from_selectors("Nobody", "XAUUSD", "Nobody", "EURUSD");
    let view = plot.table(&pair, TimeRange::All, None).await.unwrap().applied().unwrap();
    assert!(view.is_empty());
}

#[tokio::test]
async fn source_failure_is_returned_and_leaves_state_alone() {
    let plot = plot();
    let failing = PairKey::from_selectors("FAIL", "XAUUSD", "Zeal Capital", "XAUUSDe");
    let t0 = fixture_anchor();
    plot.record_pan(&gold(), ViewportWindow::new(t0, t0)).await;

    let err = plot.chart(&failing, TimeRange::All).await.unwrap_err();
    assert!(matches!(err, QuotePlotError::Source { .. }));
    assert!(err.is_transport());
    assert_eq!(plot.export_viewports().await.len(), 1);

    // The failed ticket was never admitted, so the next refresh applies.
    assert!(plot.chart(&gold(), TimeRange::All).await.unwrap().is_applied());
}

#[tokio::test(start_paused = true)]
async fn slow_source_times_out() {
    let plot = QuotePlot::builder()
        .with_source(Arc::new(MockSource::new()))
        .fetch_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let slow = PairKey::from_selectors("TIMEOUT", "XAUUSD", "Zeal Capital", "XAUUSDe");

    let err = plot.chart(&slow, TimeRange::All).await.unwrap_err();
    assert_eq!(err, QuotePlotError::timeout("quoteplot-mock"));
}

#[tokio::test]
async fn refresh_runs_chart_and_table() {
    let plot = plot();
    let (chart, table) = plot.refresh(&gold(), TimeRange::All).await;
    assert!(chart.unwrap().is_applied());
    assert!(table.unwrap().is_applied());
}

#[tokio::test]
async fn wire_payload_flows_into_the_table() {
    let payload = r#"{"data": [
        {"broker": "A", "symbol": "EURUSD", "timestamp": "2024-01-01 10:00:00", "ask_price": 1.1000, "bid_price": 1.0998},
        {"broker": "B", "symbol": "EURUSD", "timestamp": "2024-01-01 10:00:01", "ask_price": 1.1003, "bid_price": 1.1001},
        {"broker": "A", "symbol": "EURUSD", "timestamp": "2024-01-01T10:00:02Z", "ask_price": 1.1010, "bid_price": 1.1008}
    ]}"#;
    let plot = QuotePlot::builder()
        .with_source(Arc::new(JsonSource(payload)))
        .build()
        .unwrap();
    let pair = PairKey::from_selectors("A", "EURUSD", "B", "EURUSD");

    let view = plot.table(&pair, TimeRange::All, None).await.unwrap().applied().unwrap();
    assert_eq!(view.rows.len(), 3);
    assert_eq!(view.rows[0].timestamp, "2024-01-01 10:00:02");
    assert_eq!(view.rows[1].a_ask, "1.10050");
    assert_eq!(view.rows[2].b_bid, "N/A");
    assert_eq!(view.rows[0].spread, "0.00090");
}

#[tokio::test]
async fn bad_wire_timestamp_is_a_fetch_error() {
    let payload = r#"{"data": [{"broker": "A", "symbol": "X", "timestamp": "yesterday"}]}"#;
    let plot = QuotePlot::builder()
        .with_source(Arc::new(JsonSource(payload)))
        .build()
        .unwrap();
    let pair = PairKey::from_selectors("A", "X", "B", "X");
    let err = plot.chart(&pair, TimeRange::All).await.unwrap_err();
    assert_eq!(err, QuotePlotError::invalid_timestamp("yesterday"));
}
