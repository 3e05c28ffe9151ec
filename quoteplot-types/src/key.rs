//! Identity keys for quote series and series pairs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one quote series: a broker and a trading symbol.
///
/// Compared structurally, so `("a_b", "c")` and `("a", "b_c")` stay distinct
/// even though both display as `a_b_c`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesKey {
    /// Broker name, e.g. `"Tradeview"`.
    pub broker: String,
    /// Trading symbol as quoted by the broker, e.g. `"XAUUSD"`.
    pub symbol: String,
}

impl SeriesKey {
    /// Construct a series key from a broker and a symbol.
    pub fn new(broker: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            broker: broker.into(),
            symbol: symbol.into(),
        }
    }

    /// Human-facing label used for chart datasets and table headers.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.broker, self.symbol)
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.broker, self.symbol)
    }
}

/// Ordered pair of series shown together: series A and series B.
///
/// This is the identity under which a viewport window is persisted. Order
/// matters: `(A, B)` and `(B, A)` are different pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey {
    /// Series A (spread minuend, primary axis).
    pub a: SeriesKey,
    /// Series B (spread subtrahend, secondary axis).
    pub b: SeriesKey,
}

impl PairKey {
    /// Construct a pair key from two series keys.
    #[must_use]
    pub const fn new(a: SeriesKey, b: SeriesKey) -> Self {
        Self { a, b }
    }

    /// Construct a pair key from the four selectors
    /// `(broker_a, symbol_a, broker_b, symbol_b)`.
    pub fn from_selectors(
        broker_a: impl Into<String>,
        symbol_a: impl Into<String>,
        broker_b: impl Into<String>,
        symbol_b: impl Into<String>,
    ) -> Self {
        Self {
            a: SeriesKey::new(broker_a, symbol_a),
            b: SeriesKey::new(broker_b, symbol_b),
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.a, self.b)
    }
}
