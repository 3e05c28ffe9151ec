use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use quoteplot_core::{QuoteRecord, SeriesKey};

/// Ten minutes of quotes per fixture series.
const SPAN_MS: i64 = 10 * 60 * 1000;

/// 2024-01-01T10:10:00Z, the instant of the newest fixture quote.
pub fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 10, 10, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

struct Fixture {
    broker: &'static str,
    symbol: &'static str,
    tick_ms: i64,
    mid: f64,
    half_spread: f64,
    pip: f64,
}

const FIXTURES: &[Fixture] = &[
    Fixture {
        broker: "Tradeview",
        symbol: "XAUUSD",
        tick_ms: 700,
        mid: 2_050.0,
        half_spread: 0.15,
        pip: 0.01,
    },
    Fixture {
        broker: "Zeal Capital",
        symbol: "XAUUSDe",
        tick_ms: 1_300,
        mid: 2_050.4,
        half_spread: 0.20,
        pip: 0.01,
    },
    Fixture {
        broker: "Tradeview",
        symbol: "EURUSD",
        tick_ms: 900,
        mid: 1.1000,
        half_spread: 0.00008,
        pip: 0.00001,
    },
    Fixture {
        broker: "Zeal Capital",
        symbol: "EURUSDe",
        tick_ms: 1_100,
        mid: 1.1002,
        half_spread: 0.00010,
        pip: 0.00001,
    },
];

/// Known fixture series.
pub fn series() -> Vec<SeriesKey> {
    FIXTURES
        .iter()
        .map(|f| SeriesKey::new(f.broker, f.symbol))
        .collect()
}

/// Deterministic quotes for `key`, oldest first, or `None` if there is no
/// fixture for it.
///
/// Every 17th tick is missing its bid, so gaps show up in tables and charts.
pub fn for_series(key: &SeriesKey) -> Option<Vec<QuoteRecord>> {
    let f = FIXTURES
        .iter()
        .find(|f| f.broker == key.broker && f.symbol == key.symbol)?;
    let ticks = SPAN_MS / f.tick_ms;
    // Counted back from the anchor so every series ends on it.
    let start = anchor() - TimeDelta::milliseconds(ticks * f.tick_ms);
    let out = (0..=ticks)
        .map(|i| {
            // Saw-tooth walk: +-50 pips around the mid.
            #[allow(clippy::cast_precision_loss)]
            let drift = ((i * 37) % 101 - 50) as f64 * f.pip;
            let mid = f.mid + drift;
            let bid = (i % 17 != 16).then_some(mid - f.half_spread);
            QuoteRecord::new(
                f.broker,
                f.symbol,
                start + TimeDelta::milliseconds(i * f.tick_ms),
                Some(mid + f.half_spread),
                bid,
            )
        })
        .collect();
    Some(out)
}
