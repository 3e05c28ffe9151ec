use std::sync::Arc;
use std::time::Duration;

use quoteplot::{PairKey, QuotePlot, TimeRange};
use quoteplot_mock::MockSource;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,quoteplot=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let plot = QuotePlot::builder()
        .with_source(Arc::new(MockSource::new()))
        .fetch_timeout(Duration::from_millis(100))
        .build()?;

    let gold = PairKey::from_selectors("Tradeview", "XAUUSD", "Zeal Capital", "XAUUSDe");
    let _ = plot.chart(&gold, TimeRange::All).await?;
    let _ = plot.table(&gold, TimeRange::All, None).await?;

    // A failing and a timing-out fetch, to show the warn-level events.
    let failing = PairKey::from_selectors("FAIL", "XAUUSD", "Zeal Capital", "XAUUSDe");
    let _ = plot.chart(&failing, TimeRange::All).await;
    let slow = PairKey::from_selectors("TIMEOUT", "XAUUSD", "Zeal Capital", "XAUUSDe");
    let _ = plot.chart(&slow, TimeRange::All).await;

    Ok(())
}
