//! Mock quote sources for tests and demos.
//!
//! - [`MockSource`]: static fixtures for a handful of broker/symbol series.
//! - [`DynamicMockSource`]: behavior scripted per pair by a test through its
//!   [`DynamicMockController`].
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quoteplot_core::{DataRequest, PairKey, QuotePlotError, QuoteRecord, QuoteSource};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockSource, MockBehavior};
pub use fixtures::quotes::{anchor as fixture_anchor, series as fixture_series};

/// Mock source for CI-safe demos. Serves deterministic data from static
/// fixtures.
///
/// Special brokers:
/// - `"FAIL"` in either series fails the fetch with a source error;
/// - `"TIMEOUT"` in either series sleeps for 200 ms before answering.
#[derive(Debug, Clone)]
pub struct MockSource {
    now: DateTime<Utc>,
    latency: Option<Duration>,
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSource {
    /// A source whose "now" is the newest fixture quote.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: fixtures::quotes::anchor(),
            latency: None,
        }
    }

    /// Evaluate time ranges relative to `now` instead of the fixture anchor.
    #[must_use]
    pub const fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Delay every fetch by `latency`.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    fn forced(pair: &PairKey) -> Result<Option<Duration>, QuotePlotError> {
        let brokers = [pair.a.broker.as_str(), pair.b.broker.as_str()];
        if brokers.contains(&"FAIL") {
            return Err(QuotePlotError::source(
                "quoteplot-mock",
                format!("forced failure: {pair}"),
            ));
        }
        if brokers.contains(&"TIMEOUT") {
            return Ok(Some(Duration::from_millis(200)));
        }
        Ok(None)
    }
}

/// Apply a request's time range and limit to records: drops records older
/// than the range's cutoff, keeps the newest `limit`, returns them newest
/// first.
#[must_use]
pub fn apply_request(
    mut records: Vec<QuoteRecord>,
    req: &DataRequest,
    now: DateTime<Utc>,
) -> Vec<QuoteRecord> {
    if let Some(cutoff) = req.range.cutoff(now) {
        records.retain(|r| r.ts >= cutoff);
    }
    records.sort_by(|x, y| y.ts.cmp(&x.ts));
    records.truncate(req.limit);
    records
}

#[async_trait]
impl QuoteSource for MockSource {
    fn name(&self) -> &'static str {
        "quoteplot-mock"
    }

    async fn fetch(&self, req: &DataRequest) -> Result<Vec<QuoteRecord>, QuotePlotError> {
        let delay = Self::forced(&req.pair)?.or(self.latency);
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
        let mut records = fixtures::quotes::for_series(&req.pair.a).unwrap_or_default();
        if req.pair.b != req.pair.a {
            records.extend(fixtures::quotes::for_series(&req.pair.b).unwrap_or_default());
        }
        Ok(apply_request(records, req, self.now))
    }
}
