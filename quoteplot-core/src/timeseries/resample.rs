use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use quoteplot_types::{DEFAULT_STEP_MS, QuoteRecord, SeriesKey};
use serde::Serialize;

use super::bucket::{SeriesBucket, collect_series};
use super::interpolate::interpolate;
use super::timeline::build_timeline;

/// One series' prices on the canonical timeline.
///
/// `ask`, `bid` and `midline` are index-aligned with [`Resampled::timeline`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedSeries {
    /// Series these values belong to.
    pub key: SeriesKey,
    /// Interpolated ask prices.
    pub ask: Vec<Option<f64>>,
    /// Interpolated bid prices.
    pub bid: Vec<Option<f64>>,
    /// `(ask + bid) / 2` where both are present.
    pub midline: Vec<Option<f64>>,
}

impl AlignedSeries {
    fn empty(key: &SeriesKey) -> Self {
        Self {
            key: key.clone(),
            ask: Vec::new(),
            bid: Vec::new(),
            midline: Vec::new(),
        }
    }

    fn from_bucket(key: &SeriesKey, bucket: &SeriesBucket, grid: &[i64]) -> Self {
        // An empty bucket interpolates to absent everywhere.
        let ask = interpolate(&bucket.ts, &bucket.ask, grid);
        let bid = interpolate(&bucket.ts, &bucket.bid, grid);
        let midline = combine(&ask, &bid, |a, b| (a + b) / 2.0);
        Self {
            key: key.clone(),
            ask,
            bid,
            midline,
        }
    }

    /// Number of timeline points covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ask.len()
    }

    /// Returns `true` if the series covers no timeline points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ask.is_empty()
    }

    /// Returns `true` if at least one ask or bid value is present.
    #[must_use]
    pub fn has_values(&self) -> bool {
        self.ask.iter().chain(&self.bid).any(Option::is_some)
    }
}

/// Two quote series aligned on one uniform timeline, plus their spread.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resampled {
    /// Canonical timeline shared by both series.
    pub timeline: Vec<DateTime<Utc>>,
    /// Series A.
    pub a: AlignedSeries,
    /// Series B.
    pub b: AlignedSeries,
    /// `ask(A) - bid(B)` where both are present.
    pub spread: Vec<Option<f64>>,
}

impl Resampled {
    /// An empty result for the given pair: no timeline, no values.
    #[must_use]
    pub fn empty(a: &SeriesKey, b: &SeriesKey) -> Self {
        Self {
            timeline: Vec::new(),
            a: AlignedSeries::empty(a),
            b: AlignedSeries::empty(b),
            spread: Vec::new(),
        }
    }

    /// Number of timeline points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    /// Returns `true` when there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }
}

fn combine<F>(x: &[Option<f64>], y: &[Option<f64>], f: F) -> Vec<Option<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    x.iter()
        .zip(y)
        .map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some(f(*a, *b)),
            _ => None,
        })
        .collect()
}

/// Resample two quote series onto a shared one-second timeline.
///
/// - Records are stably sorted by timestamp; the timeline runs from the
///   earliest to (at most) the latest record over *all* input, in 1 s steps.
/// - Each requested series' ask and bid are interpolated independently
///   (see [`interpolate`](super::interpolate::interpolate)): linear between
///   samples, hold-last after the final sample, absent before the first
///   sample and across any absent neighbour.
/// - Midline is `(ask + bid) / 2`; spread is `ask(A) - bid(B)`; each only
///   where both operands are present.
/// - A requested series with no records is absent everywhere.
///
/// Never fails: empty input yields [`Resampled::empty`].
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use quoteplot_core::{QuoteRecord, SeriesKey, resample};
///
/// let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
/// let a = SeriesKey::new("A", "EURUSD");
/// let b = SeriesKey::new("B", "EURUSD");
/// let records = vec![
///     QuoteRecord::new("A", "EURUSD", t0, Some(1.1000), Some(1.0998)),
///     QuoteRecord::new("A", "EURUSD", t0 + chrono::TimeDelta::seconds(2), Some(1.1010), Some(1.1008)),
/// ];
/// let out = resample(records, &a, &b);
/// assert_eq!(out.timeline.len(), 3);
/// assert!((out.a.ask[1].unwrap() - 1.1005).abs() < 1e-12);
/// assert!(out.spread.iter().all(Option::is_none));
/// ```
#[must_use]
pub fn resample(records: Vec<QuoteRecord>, a: &SeriesKey, b: &SeriesKey) -> Resampled {
    resample_with_step(records, a, b, DEFAULT_STEP_MS)
}

/// Resample onto a timeline with a custom step (milliseconds).
///
/// Same rules as [`resample`]; only the timeline spacing differs.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "quoteplot::resample",
        skip(records),
        fields(records = records.len(), series_a = %a, series_b = %b, step_ms = step_ms.get()),
    )
)]
#[must_use]
pub fn resample_with_step(
    mut records: Vec<QuoteRecord>,
    a: &SeriesKey,
    b: &SeriesKey,
    step_ms: NonZeroU32,
) -> Resampled {
    records.sort_by_key(|r| r.ts);

    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return Resampled::empty(a, b);
    };
    let timeline = build_timeline(first.ts, last.ts, step_ms);
    let grid: Vec<i64> = timeline.iter().map(DateTime::timestamp_millis).collect();

    let bucket_a = collect_series(&records, a);
    let bucket_b = collect_series(&records, b);
    let series_a = AlignedSeries::from_bucket(a, &bucket_a, &grid);
    let series_b = AlignedSeries::from_bucket(b, &bucket_b, &grid);
    let spread = combine(&series_a.ask, &series_b.bid, |ask, bid| ask - bid);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        points = timeline.len(),
        samples_a = bucket_a.len(),
        samples_b = bucket_b.len(),
        a_present = series_a.has_values(),
        b_present = series_b.has_values(),
        "resampled quote pair"
    );

    Resampled {
        timeline,
        a: series_a,
        b: series_b,
        spread,
    }
}
