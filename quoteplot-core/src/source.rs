use async_trait::async_trait;
use quoteplot_types::{PairKey, QuoteRecord, QuotePlotError, TimeRange};
use serde::{Deserialize, Serialize};

/// What to fetch for one refresh.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataRequest {
    /// The two series to fetch; records for other series may be returned and
    /// are ignored downstream.
    pub pair: PairKey,
    /// How far back to look.
    pub range: TimeRange,
    /// Maximum number of records, newest kept first.
    pub limit: usize,
}

impl DataRequest {
    /// Build a request.
    #[must_use]
    pub const fn new(pair: PairKey, range: TimeRange, limit: usize) -> Self {
        Self { pair, range, limit }
    }
}

/// A provider of quote records for a series pair.
///
/// Implementations own the transport and wire decoding; they hand back
/// already-decoded records in any order. Failures are reported as
/// [`QuotePlotError::Source`] (or any other variant the implementation sees
/// fit) and never reach the resampler.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Stable identifier used in logs and errors.
    fn name(&self) -> &'static str;

    /// Fetch records for `req`.
    async fn fetch(&self, req: &DataRequest) -> Result<Vec<QuoteRecord>, QuotePlotError>;
}
