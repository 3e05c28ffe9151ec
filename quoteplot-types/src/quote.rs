//! Raw quote records and their wire representation.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QuotePlotError;
use crate::key::SeriesKey;

/// Naive layouts emitted by the upstream quote service; interpreted as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// One bid/ask observation for a broker/symbol series.
///
/// Records arrive unordered and are never mutated after decoding. Either
/// side of the quote may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Broker that published the quote.
    pub broker: String,
    /// Symbol as quoted by the broker.
    pub symbol: String,
    /// Observation instant, millisecond resolution.
    pub ts: DateTime<Utc>,
    /// Ask price, if quoted.
    pub ask: Option<f64>,
    /// Bid price, if quoted.
    pub bid: Option<f64>,
}

impl QuoteRecord {
    /// Construct a record; `ts` is truncated to millisecond resolution.
    pub fn new(
        broker: impl Into<String>,
        symbol: impl Into<String>,
        ts: DateTime<Utc>,
        ask: Option<f64>,
        bid: Option<f64>,
    ) -> Self {
        Self {
            broker: broker.into(),
            symbol: symbol.into(),
            ts: ts.trunc_subsecs(3),
            ask,
            bid,
        }
    }

    /// Series identity of this record.
    #[must_use]
    pub fn series_key(&self) -> SeriesKey {
        SeriesKey::new(self.broker.clone(), self.symbol.clone())
    }

    /// Returns `true` if the record belongs to `key`.
    #[must_use]
    pub fn is_series(&self, key: &SeriesKey) -> bool {
        self.broker == key.broker && self.symbol == key.symbol
    }
}

/// A quote as delivered by the data-fetch collaborator.
///
/// Mirrors the JSON rows of the quote service: `timestamp` is text and prices
/// are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireQuote {
    /// Broker name.
    pub broker: String,
    /// Symbol.
    pub symbol: String,
    /// ISO-8601 instant; naive values are taken as UTC.
    pub timestamp: String,
    /// Ask price, if quoted.
    #[serde(default)]
    pub ask_price: Option<f64>,
    /// Bid price, if quoted.
    #[serde(default)]
    pub bid_price: Option<f64>,
    /// Upstream capture session, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl TryFrom<WireQuote> for QuoteRecord {
    type Error = QuotePlotError;

    fn try_from(w: WireQuote) -> Result<Self, Self::Error> {
        let ts = parse_timestamp(&w.timestamp)?;
        Ok(Self {
            broker: w.broker,
            symbol: w.symbol,
            ts,
            ask: w.ask_price.filter(|v| v.is_finite()),
            bid: w.bid_price.filter(|v| v.is_finite()),
        })
    }
}

/// Envelope of a quote batch as returned by the quote service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WireBatch {
    /// Quote rows, in no particular order.
    #[serde(default)]
    pub data: Vec<WireQuote>,
}

impl WireBatch {
    /// Decode every row into a [`QuoteRecord`].
    ///
    /// # Errors
    /// Returns `InvalidTimestamp` for the first row whose timestamp cannot be
    /// parsed. A batch is decoded entirely or not at all.
    pub fn into_records(self) -> Result<Vec<QuoteRecord>, QuotePlotError> {
        self.data.into_iter().map(QuoteRecord::try_from).collect()
    }
}

/// Parse a wire timestamp into a UTC instant truncated to milliseconds.
///
/// Accepts RFC 3339 (`2024-01-01T10:00:00.250Z`, any offset) and the naive
/// forms `YYYY-MM-DD HH:MM:SS[.fff]` / `YYYY-MM-DDTHH:MM:SS[.fff]`, which are
/// read as UTC.
///
/// # Errors
/// Returns `InvalidTimestamp` if none of the accepted layouts match.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, QuotePlotError> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc).trunc_subsecs(3));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|n| n.and_utc().trunc_subsecs(3))
        .ok_or_else(|| QuotePlotError::invalid_timestamp(raw))
}
