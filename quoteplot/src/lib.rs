//! quoteplot aligns two independently sampled bid/ask quote series on one
//! clock and turns them into chart and spread-table views.
//!
//! Overview
//! - Fetches a series pair from a pluggable [`QuoteSource`] with a per-fetch
//!   timeout.
//! - Resamples both series onto a uniform timeline (1 s by default) with
//!   linear interpolation and hold-last extrapolation, then derives
//!   `ask(A) - bid(B)`.
//! - Remembers the user's pan/zoom window per pair and falls back to the last
//!   five minutes of data.
//! - Orders overlapping refreshes so that the newest request wins, even when
//!   an older response arrives later.
//!
//! Key behaviors and trade-offs
//! - Chart and table refreshes are sequenced independently; a table refresh
//!   never supersedes a chart refresh.
//! - A superseded refresh still costs a fetch; it is dropped only after its
//!   result is ready.
//! - Recorded viewports are returned verbatim, even if the data has moved on.
//!   Bound the store with `viewport_capacity` to cap memory when many pairs
//!   are browsed.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use quoteplot::{PairKey, QuotePlot, TimeRange};
//! use quoteplot_mock::MockSource;
//!
//! let plot = QuotePlot::builder()
//!     .with_source(Arc::new(MockSource::new()))
//!     .build()?;
//! let pair = PairKey::from_selectors("Tradeview", "XAUUSD", "Zeal Capital", "XAUUSDe");
//! if let Some(update) = plot.chart(&pair, TimeRange::All).await?.applied() {
//!     println!("{} points, window {:?}", update.frame.labels.len(), update.viewport);
//! }
//! ```
//!
//! See `quoteplot/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;

pub use core::{ChartUpdate, QuotePlot, QuotePlotBuilder, Refresh};

// Re-export core types for convenience
pub use quoteplot_core::{
    AlignedSeries, Axis, ChartDataset, ChartFrame, DataRequest, DisplayMode, LruViewportStore,
    MemoryViewportStore, PairKey, QuotePlotConfig, QuotePlotError, QuoteRecord, QuoteSource,
    Resampled, SeriesKey, TableRow, TableView, Ticket, TimeRange, ViewportEntry, ViewportStore,
    ViewportWindow, WireBatch, WireQuote,
};
