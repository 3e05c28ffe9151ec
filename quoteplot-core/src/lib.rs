//! quoteplot-core
//!
//! Resampling, spread computation, viewport state and render projections for
//! two independently sampled bid/ask quote series.
//!
//! - `timeseries`: canonical timeline, per-series interpolation and spread.
//! - `viewport`: per-pair visible window state with pluggable stores.
//! - `render`: chart frame and spread table projections.
//! - `sequence`: "last request wins" ordering for overlapping refreshes.
//! - `source`: the `QuoteSource` trait implemented by data collaborators.
//!
//! Everything except `source` is synchronous. The resampler and the
//! projections are pure functions and safe to call from any thread.
#![warn(missing_docs)]

/// Chart and table projections of resampled data.
pub mod render;
/// Request sequencing for overlapping refreshes.
pub mod sequence;
/// Quote source trait and request type.
pub mod source;
/// Timeline construction, interpolation and resampling.
pub mod timeseries;
pub mod viewport;

pub use quoteplot_types::*;
pub use render::{Axis, ChartDataset, ChartFrame, TableRow, TableView, chart_frame, table_view};
pub use sequence::{RequestSequencer, Ticket};
pub use source::{DataRequest, QuoteSource};
pub use timeseries::resample::{AlignedSeries, Resampled, resample, resample_with_step};
pub use timeseries::timeline::build_timeline;
pub use viewport::{LruViewportStore, MemoryViewportStore, ViewportManager, ViewportStore};
