//! Configuration types shared across the orchestrator and its collaborators.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QuotePlotError;

/// Timeline step used when none is configured: one second.
pub const DEFAULT_STEP_MS: NonZeroU32 = NonZeroU32::new(1_000).unwrap();

/// Time window of quotes requested from the source.
///
/// Serialized the way the quote service expects its `time_range_hours`
/// parameter: `"all"` or a whole number of hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeRange {
    /// Every stored quote.
    #[default]
    All,
    /// Quotes no older than this many hours before "now".
    LastHours(NonZeroU32),
}

impl TimeRange {
    /// Oldest instant admitted by this range relative to `now`, or `None`
    /// for [`TimeRange::All`].
    ///
    /// A range reaching back past the earliest representable instant admits
    /// everything, like [`TimeRange::All`].
    #[must_use]
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::All => None,
            Self::LastHours(h) => now.checked_sub_signed(TimeDelta::hours(i64::from(h.get()))),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::LastHours(h) => write!(f, "{h}"),
        }
    }
}

impl FromStr for TimeRange {
    type Err = QuotePlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<NonZeroU32>()
            .map(Self::LastHours)
            .map_err(|_| QuotePlotError::InvalidArg(format!("time range must be 'all' or hours > 0, got {s:?}")))
    }
}

impl TryFrom<String> for TimeRange {
    type Error = QuotePlotError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeRange> for String {
    fn from(r: TimeRange) -> Self {
        r.to_string()
    }
}

/// Which price lines the chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum DisplayMode {
    /// Ask and bid lines for both series.
    #[default]
    AskBid,
    /// One midline `(ask + bid) / 2` per series.
    Midline,
}

/// Global configuration for the `QuotePlot` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotePlotConfig {
    /// Spacing of the canonical timeline in milliseconds.
    pub step_ms: NonZeroU32,
    /// Width of the default viewport, anchored at the end of the timeline.
    pub default_window: Duration,
    /// Maximum number of persisted viewport windows; `None` keeps every pair.
    pub viewport_capacity: Option<usize>,
    /// Maximum number of quote records requested per fetch.
    pub fetch_limit: usize,
    /// Timeout for one fetch from the quote source.
    pub fetch_timeout: Duration,
    /// Number of rows in the spread table when the caller does not say.
    pub table_rows: usize,
    /// Timezone used to render table timestamps.
    pub table_timezone: chrono_tz::Tz,
    /// Chart display mode used by `chart`.
    pub display_mode: DisplayMode,
}

impl Default for QuotePlotConfig {
    fn default() -> Self {
        Self {
            step_ms: DEFAULT_STEP_MS,
            default_window: Duration::from_secs(5 * 60),
            viewport_capacity: None,
            fetch_limit: 1000,
            fetch_timeout: Duration::from_secs(5),
            table_rows: 10,
            table_timezone: chrono_tz::UTC,
            display_mode: DisplayMode::AskBid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn new_year() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn cutoff_counts_back_whole_hours() {
        let r: TimeRange = "6".parse().unwrap();
        assert_eq!(r.cutoff(new_year()), Some(new_year() - TimeDelta::hours(6)));
        assert_eq!(TimeRange::All.cutoff(new_year()), None);
    }

    #[test]
    fn huge_hour_count_admits_everything() {
        let r: TimeRange = "4294967295".parse().unwrap();
        assert_eq!(r, TimeRange::LastHours(NonZeroU32::MAX));
        assert_eq!(r.cutoff(new_year()), None);
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert!(matches!("0".parse::<TimeRange>(), Err(QuotePlotError::InvalidArg(_))));
        assert!(matches!("week".parse::<TimeRange>(), Err(QuotePlotError::InvalidArg(_))));
        assert_eq!(" ALL ".parse::<TimeRange>().unwrap(), TimeRange::All);
    }
}
