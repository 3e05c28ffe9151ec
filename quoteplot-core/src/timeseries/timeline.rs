use std::num::NonZeroU32;

use chrono::{DateTime, TimeDelta, Utc};

/// Build the instants `min, min + step, min + 2*step, ...` up to and including
/// `max` when it lands on a step boundary.
///
/// The last instant is never after `max`; when the span is not a whole number
/// of steps it ends strictly before `max`. Returns an empty timeline if
/// `max < min`.
///
/// ```
/// use chrono::DateTime;
/// use quoteplot_core::timeseries::timeline::build_timeline;
/// use std::num::NonZeroU32;
///
/// let min = DateTime::from_timestamp_millis(0).unwrap();
/// let max = DateTime::from_timestamp_millis(2_500).unwrap();
/// let t = build_timeline(min, max, NonZeroU32::new(1_000).unwrap());
/// let ms: Vec<i64> = t.iter().map(|d| d.timestamp_millis()).collect();
/// assert_eq!(ms, vec![0, 1_000, 2_000]);
/// ```
#[must_use]
pub fn build_timeline(
    min: DateTime<Utc>,
    max: DateTime<Utc>,
    step_ms: NonZeroU32,
) -> Vec<DateTime<Utc>> {
    if max < min {
        return Vec::new();
    }
    let step = TimeDelta::milliseconds(i64::from(step_ms.get()));
    let span_ms = (max - min).num_milliseconds();
    let points = usize::try_from(span_ms / i64::from(step_ms.get())).map_or(0, |n| n + 1);

    let mut out = Vec::with_capacity(points);
    let mut t = min;
    while t <= max {
        out.push(t);
        match t.checked_add_signed(step) {
            Some(next) => t = next,
            None => break,
        }
    }
    out
}
