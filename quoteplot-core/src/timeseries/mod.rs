//! Time-series utilities for aligning two quote series on one clock.
//!
//! Modules include:
//! - `timeline`: build the canonical uniform timeline
//! - `bucket`: group raw quotes into per-series, time-ordered buckets
//! - `interpolate`: forward-cursor linear interpolation with hold-last
//! - `resample`: put it together into aligned ask/bid/midline and spread
/// Per-series grouping of raw quote records.
pub mod bucket;
/// Piecewise-linear interpolation onto a target grid.
pub mod interpolate;
/// Resampling of two quote series onto a shared timeline.
pub mod resample;
/// Canonical timeline construction.
pub mod timeline;
