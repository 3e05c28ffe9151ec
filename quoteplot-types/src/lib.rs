//! Quote records, series keys, viewport windows and configuration shared by
//! the quoteplot crates.
#![warn(missing_docs)]

mod config;
mod error;
mod key;
mod quote;
mod viewport;

pub use config::{DEFAULT_STEP_MS, DisplayMode, QuotePlotConfig, TimeRange};
pub use error::QuotePlotError;
pub use key::{PairKey, SeriesKey};
pub use quote::{QuoteRecord, WireBatch, WireQuote, parse_timestamp};
pub use viewport::{ViewportEntry, ViewportWindow};
