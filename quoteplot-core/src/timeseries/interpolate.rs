/// Forward-only search position over a sample timeline.
///
/// A cursor lives for one interpolation pass. Targets must be visited in
/// non-decreasing order; the cursor never moves backwards, so a full pass
/// costs O(samples + targets).
#[derive(Debug)]
pub struct Cursor<'a> {
    times: &'a [i64],
    i: usize,
}

impl<'a> Cursor<'a> {
    /// Start a cursor at the first sample.
    #[must_use]
    pub const fn new(times: &'a [i64]) -> Self {
        Self { times, i: 0 }
    }

    /// Advance to the last sample whose successor is not before `t`.
    ///
    /// Afterwards either `times[i + 1] >= t`, or `i` is the last sample.
    pub fn seek(&mut self, t: i64) -> usize {
        while self.i + 1 < self.times.len() && self.times[self.i + 1] < t {
            self.i += 1;
        }
        self.i
    }
}

/// Interpolate one field of a series onto `grid`.
///
/// `times` must be non-decreasing and index-aligned with `values`; `grid`
/// must be non-decreasing. Per target instant `t`:
///
/// - before the first sample: absent. Bracket-search plotters commonly
///   extrapolate backwards along the first segment here (or hold a lone
///   sample's value); this function never fabricates a price ahead of the
///   data;
/// - beyond the last sample: the last sample's value (hold-last), which is
///   itself absent if that sample's field was absent;
/// - on a sample instant: that sample's value, bit-for-bit;
/// - strictly between two samples: linear interpolation, or absent if either
///   neighbour is absent.
///
/// An empty series yields absent at every target.
///
/// ```
/// use quoteplot_core::timeseries::interpolate::interpolate;
///
/// let times = [0, 2_000];
/// let values = [Some(1.0), Some(2.0)];
/// let out = interpolate(&times, &values, &[0, 1_000, 2_000, 3_000]);
/// assert_eq!(out, vec![Some(1.0), Some(1.5), Some(2.0), Some(2.0)]);
/// ```
#[must_use]
pub fn interpolate(times: &[i64], values: &[Option<f64>], grid: &[i64]) -> Vec<Option<f64>> {
    debug_assert_eq!(times.len(), values.len());
    let n = times.len().min(values.len());
    let (times, values) = (&times[..n], &values[..n]);

    let Some(&first) = times.first() else {
        return vec![None; grid.len()];
    };

    let mut cursor = Cursor::new(times);
    grid.iter()
        .map(|&t| {
            if t < first {
                return None;
            }
            let i = cursor.seek(t);
            if i + 1 >= n {
                return values[n - 1];
            }
            let (t0, t1) = (times[i], times[i + 1]);
            if t == t0 {
                return values[i];
            }
            if t == t1 {
                return values[i + 1];
            }
            let (v0, v1) = (values[i]?, values[i + 1]?);
            // t0 < t < t1 here, so the denominator is positive.
            #[allow(clippy::cast_precision_loss)]
            let v = v0 + (v1 - v0) * (t - t0) as f64 / (t1 - t0) as f64;
            Some(v)
        })
        .collect()
}
