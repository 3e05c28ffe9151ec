use chrono::{DateTime, TimeDelta, Utc};
use quoteplot_types::{PairKey, ViewportEntry, ViewportWindow};

use super::store::{LruViewportStore, MemoryViewportStore, ViewportStore};

/// Width of the default window when none is configured.
pub const DEFAULT_SPAN: TimeDelta = TimeDelta::minutes(5);

/// Tracks the visible window per series pair.
///
/// A window recorded for a pair is restored verbatim whenever that pair is
/// shown again, until it is cleared. Pairs without a recorded window get a
/// default window anchored at the end of the timeline.
///
/// Switching pairs only changes which key is looked up: windows recorded for
/// other pairs stay in the store.
pub struct ViewportManager {
    store: Box<dyn ViewportStore>,
    default_span: TimeDelta,
}

impl Default for ViewportManager {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for ViewportManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportManager")
            .field("persisted", &self.store.len())
            .field("default_span", &self.default_span)
            .finish_non_exhaustive()
    }
}

impl ViewportManager {
    /// Create a manager over the given store.
    #[must_use]
    pub fn new(store: Box<dyn ViewportStore>) -> Self {
        Self {
            store,
            default_span: DEFAULT_SPAN,
        }
    }

    /// Manager backed by an unbounded in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryViewportStore::new()))
    }

    /// Manager that keeps at most `capacity` pairs, evicting the least
    /// recently used.
    #[must_use]
    pub fn bounded(capacity: usize) -> Self {
        Self::new(Box::new(LruViewportStore::new(capacity)))
    }

    /// Override the width of the default window. Negative spans are treated
    /// as zero.
    #[must_use]
    pub fn with_default_span(mut self, span: TimeDelta) -> Self {
        self.default_span = span.max(TimeDelta::zero());
        self
    }

    /// Width of the default window.
    #[must_use]
    pub const fn default_span(&self) -> TimeDelta {
        self.default_span
    }

    /// Persist the window the user panned or zoomed to, replacing any
    /// previous window for `key`.
    pub fn record_pan(&mut self, key: &PairKey, window: ViewportWindow) {
        // Normalizes reversed bounds from the widget.
        let window = ViewportWindow::new(window.min, window.max);
        self.store.put(key.clone(), window);
    }

    /// Forget the window recorded for `key` ("reset zoom").
    pub fn clear(&mut self, key: &PairKey) -> Option<ViewportWindow> {
        self.store.remove(key)
    }

    /// Window recorded for `key`, if any.
    pub fn persisted(&mut self, key: &PairKey) -> Option<ViewportWindow> {
        self.store.get(key)
    }

    /// Window to show for `key` over `timeline`.
    ///
    /// A recorded window is returned unchanged, even if it lies outside the
    /// current timeline. Otherwise this is the default window (see
    /// [`default_window`](Self::default_window)).
    pub fn resolve_default(
        &mut self,
        key: &PairKey,
        timeline: &[DateTime<Utc>],
    ) -> Option<ViewportWindow> {
        if let Some(w) = self.store.get(key) {
            return Some(w);
        }
        self.default_window(timeline)
    }

    /// `[max(first, last - span), last]` over a sorted timeline, or `None`
    /// when the timeline is empty.
    #[must_use]
    pub fn default_window(&self, timeline: &[DateTime<Utc>]) -> Option<ViewportWindow> {
        let (&first, &last) = (timeline.first()?, timeline.last()?);
        let start = last
            .checked_sub_signed(self.default_span)
            .map_or(first, |s| s.max(first));
        Some(ViewportWindow { min: start, max: last })
    }

    /// Number of pairs with a recorded window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if no window is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Snapshot every recorded window for durable storage.
    #[must_use]
    pub fn export(&self) -> Vec<ViewportEntry> {
        self.store.entries()
    }

    /// Record every entry, in order, as if each had been panned to.
    pub fn import<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = ViewportEntry>,
    {
        for e in entries {
            self.record_pan(&e.key, e.window);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    fn timeline(from: i64, to: i64) -> Vec<DateTime<Utc>> {
        (from..=to).map(at).collect()
    }

    fn pair() -> PairKey {
        PairKey::from_selectors("Tradeview", "XAUUSD", "Zeal Capital", "XAUUSDe")
    }

    #[test]
    fn default_window_is_last_five_minutes() {
        let mut m = ViewportManager::in_memory();
        let w = m.resolve_default(&pair(), &timeline(0, 600)).unwrap();
        assert_eq!(w.min, at(300));
        assert_eq!(w.max, at(600));
    }

    #[test]
    fn short_timeline_starts_at_first_point() {
        let m = ViewportManager::in_memory();
        let w = m.default_window(&timeline(0, 42)).unwrap();
        assert_eq!((w.min, w.max), (at(0), at(42)));
    }

    #[test]
    fn empty_timeline_has_no_window() {
        let mut m = ViewportManager::in_memory();
        assert_eq!(m.resolve_default(&pair(), &[]), None);
    }

    #[test]
    fn recorded_window_wins_and_is_not_clamped() {
        let mut m = ViewportManager::in_memory();
        let far = ViewportWindow::new(at(10_000), at(20_000));
        m.record_pan(&pair(), far);
        assert_eq!(m.resolve_default(&pair(), &timeline(0, 600)), Some(far));
    }

    #[test]
    fn clear_restores_default() {
        let mut m = ViewportManager::in_memory();
        m.record_pan(&pair(), ViewportWindow::new(at(1), at(2)));
        assert!(m.clear(&pair()).is_some());
        assert!(m.is_empty());
        let w = m.resolve_default(&pair(), &timeline(0, 600)).unwrap();
        assert_eq!(w.min, at(300));
    }

    #[test]
    fn reversed_window_is_swapped() {
        let mut m = ViewportManager::in_memory();
        m.record_pan(&pair(), ViewportWindow { min: at(9), max: at(3) });
        let w = m.persisted(&pair()).unwrap();
        assert_eq!((w.min, w.max), (at(3), at(9)));
    }

    #[test]
    fn other_pairs_stay_dormant() {
        let mut m = ViewportManager::in_memory();
        let other = PairKey::from_selectors("Zeal Capital", "XAUUSDe", "Tradeview", "XAUUSD");
        m.record_pan(&pair(), ViewportWindow::new(at(1), at(2)));
        assert_eq!(m.persisted(&other), None);
        assert_eq!(m.len(), 1);
        assert!(m.persisted(&pair()).is_some());
    }

    #[test]
    fn custom_span() {
        let m = ViewportManager::in_memory().with_default_span(TimeDelta::seconds(10));
        let w = m.default_window(&timeline(0, 600)).unwrap();
        assert_eq!(w.min, at(590));
    }

    #[test]
    fn export_import_round_trip() {
        let mut src = ViewportManager::bounded(4);
        src.record_pan(&pair(), ViewportWindow::new(at(5), at(50)));
        let mut dst = ViewportManager::in_memory();
        dst.import(src.export());
        assert_eq!(dst.persisted(&pair()), Some(ViewportWindow::new(at(5), at(50))));
    }
}
