use std::sync::Arc;

use quoteplot::{PairKey, QuotePlot, TimeRange};
use quoteplot_mock::MockSource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build the orchestrator over the fixture source, rendering in Tokyo time.
    let plot = QuotePlot::builder()
        .with_source(Arc::new(MockSource::new()))
        .table_timezone(chrono_tz::Asia::Tokyo)
        .table_rows(15)
        .build()?;

    // 2. Pick the pair to compare: A is the spread minuend, B the subtrahend.
    let pair = PairKey::from_selectors("Tradeview", "XAUUSD", "Zeal Capital", "XAUUSDe");

    // 3. Refresh chart and table together.
    let (chart, table) = plot.refresh(&pair, TimeRange::All).await;

    if let Some(update) = chart?.applied() {
        println!(
            "chart: {} points, {} datasets, window {:?}",
            update.frame.labels.len(),
            update.frame.datasets.len(),
            update.viewport
        );
    }

    let Some(view) = table?.applied() else {
        return Ok(());
    };
    if view.is_empty() {
        println!("no data");
        return Ok(());
    }
    println!("{}", view.columns.join(" | "));
    for row in &view.rows {
        println!(
            "{} | {} | {} | {} | {} | {}",
            row.timestamp, row.a_ask, row.a_bid, row.b_ask, row.b_bid, row.spread
        );
    }

    Ok(())
}
