use thiserror::Error;

/// Unified error type for the quoteplot workspace.
///
/// Only the edges of the system produce errors: decoding wire payloads,
/// building the orchestrator, and fetching from a quote source. The resampler,
/// the viewport manager and the render projections degrade missing data to
/// absent values instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuotePlotError {
    /// Invalid input argument (builder validation, malformed request).
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with returned or expected data.
    #[error("data issue: {0}")]
    Data(String),

    /// A wire timestamp could not be parsed as an instant.
    #[error("invalid timestamp: {value:?}")]
    InvalidTimestamp {
        /// The raw timestamp text as received.
        value: String,
    },

    /// A quote source returned an error.
    #[error("{source_name} failed: {msg}")]
    Source {
        /// Source name that failed.
        source_name: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A quote source did not answer within the configured fetch timeout.
    #[error("source timed out: {source_name}")]
    Timeout {
        /// Source name that timed out.
        source_name: String,
    },
}

impl QuotePlotError {
    /// Helper: build a `Source` error with the source name and message.
    pub fn source(source_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Source {
            source_name: source_name.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Timeout` error for a source.
    pub fn timeout(source_name: impl Into<String>) -> Self {
        Self::Timeout {
            source_name: source_name.into(),
        }
    }

    /// Helper: build an `InvalidTimestamp` error.
    pub fn invalid_timestamp(value: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            value: value.into(),
        }
    }

    /// Returns `true` if this error originated in the fetch layer
    /// (source failure or timeout) rather than in local validation.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Source { .. } | Self::Timeout { .. })
    }
}
