//! Visible time window types.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::key::PairKey;

/// A visible time sub-range `[min, max]` of the chart's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewportWindow {
    /// Left edge (inclusive).
    pub min: DateTime<Utc>,
    /// Right edge (inclusive).
    pub max: DateTime<Utc>,
}

impl ViewportWindow {
    /// Build a window from two edges, swapping them if given in reverse.
    #[must_use]
    pub fn new(a: DateTime<Utc>, b: DateTime<Utc>) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Build a window from epoch milliseconds, as reported by chart widgets.
    ///
    /// Returns `None` if either edge is out of chrono's representable range.
    #[must_use]
    pub fn from_millis(min_ms: i64, max_ms: i64) -> Option<Self> {
        Some(Self::new(
            DateTime::from_timestamp_millis(min_ms)?,
            DateTime::from_timestamp_millis(max_ms)?,
        ))
    }

    /// Width of the window.
    #[must_use]
    pub fn span(&self) -> TimeDelta {
        self.max - self.min
    }

    /// Returns `true` if `ts` lies within the window (edges included).
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.min <= ts && ts <= self.max
    }
}

/// A persisted viewport window together with the pair it belongs to.
///
/// This is the export/import form of a viewport store, suitable for writing to
/// durable storage as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportEntry {
    /// Series pair the window is stored under.
    pub key: PairKey,
    /// The stored window.
    pub window: ViewportWindow,
}
