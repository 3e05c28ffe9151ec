use quoteplot_types::{QuoteRecord, SeriesKey};

/// Time-ordered samples of one series, split into parallel columns.
///
/// Timestamps are epoch milliseconds and non-decreasing when built from
/// sorted records. Duplicate timestamps are kept as separate samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesBucket {
    /// Sample instants in epoch milliseconds.
    pub ts: Vec<i64>,
    /// Ask price per sample.
    pub ask: Vec<Option<f64>>,
    /// Bid price per sample.
    pub bid: Vec<Option<f64>>,
}

impl SeriesBucket {
    /// Append one sample.
    pub fn push(&mut self, ts_ms: i64, ask: Option<f64>, bid: Option<f64>) {
        self.ts.push(ts_ms);
        self.ask.push(ask);
        self.bid.push(bid);
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ts.len()
    }

    /// Returns `true` if the bucket holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ts.is_empty()
    }
}

/// Collect the samples of one series, preserving input order.
///
/// Callers sort `records` by timestamp first; the bucket then inherits that
/// order. Records of other series are skipped without allocating.
#[must_use]
pub fn collect_series(records: &[QuoteRecord], key: &SeriesKey) -> SeriesBucket {
    let mut out = SeriesBucket::default();
    for r in records.iter().filter(|r| r.is_series(key)) {
        out.push(r.ts.timestamp_millis(), r.ask, r.bid);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn rec(broker: &str, ms: i64, ask: f64) -> QuoteRecord {
        QuoteRecord::new(
            broker,
            "XAUUSD",
            DateTime::from_timestamp_millis(ms).unwrap(),
            Some(ask),
            None,
        )
    }

    #[test]
    fn keeps_only_the_requested_series_with_duplicates() {
        let records = vec![rec("A", 0, 1.0), rec("B", 0, 2.0), rec("A", 0, 1.5), rec("A", 5, 1.7)];

        let a = collect_series(&records, &SeriesKey::new("A", "XAUUSD"));
        assert_eq!(a.ts, vec![0, 0, 5]);
        assert_eq!(a.ask, vec![Some(1.0), Some(1.5), Some(1.7)]);
        assert_eq!(a.bid, vec![None, None, None]);

        assert_eq!(collect_series(&records, &SeriesKey::new("B", "XAUUSD")).len(), 1);
    }

    #[test]
    fn unknown_series_is_empty() {
        let records = vec![rec("A", 0, 1.0)];
        assert!(collect_series(&records, &SeriesKey::new("A", "EURUSD")).is_empty());
    }
}
