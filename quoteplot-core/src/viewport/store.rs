use std::collections::HashMap;
use std::num::NonZeroUsize;

use lru::LruCache;
use quoteplot_types::{PairKey, ViewportEntry, ViewportWindow};

/// Key-value storage for persisted viewport windows.
///
/// Implementations do no locking of their own; the owner serializes access
/// (a single UI thread, or a mutex around the manager).
pub trait ViewportStore: Send {
    /// Look up the window stored for `key`. May count as a use for
    /// recency-based eviction.
    fn get(&mut self, key: &PairKey) -> Option<ViewportWindow>;
    /// Store `window` for `key`, replacing any previous value.
    fn put(&mut self, key: PairKey, window: ViewportWindow);
    /// Remove and return the window stored for `key`.
    fn remove(&mut self, key: &PairKey) -> Option<ViewportWindow>;
    /// Every stored entry, in no particular order.
    fn entries(&self) -> Vec<ViewportEntry>;
    /// Number of stored windows.
    fn len(&self) -> usize;
    /// Returns `true` if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unbounded in-memory store. Windows for abandoned pairs stay until cleared.
#[derive(Debug, Default)]
pub struct MemoryViewportStore {
    inner: HashMap<PairKey, ViewportWindow>,
}

impl MemoryViewportStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ViewportStore for MemoryViewportStore {
    fn get(&mut self, key: &PairKey) -> Option<ViewportWindow> {
        self.inner.get(key).copied()
    }

    fn put(&mut self, key: PairKey, window: ViewportWindow) {
        self.inner.insert(key, window);
    }

    fn remove(&mut self, key: &PairKey) -> Option<ViewportWindow> {
        self.inner.remove(key)
    }

    fn entries(&self) -> Vec<ViewportEntry> {
        self.inner
            .iter()
            .map(|(key, window)| ViewportEntry {
                key: key.clone(),
                window: *window,
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Store bounded to a fixed number of pairs; the least recently used pair is
/// evicted when a new one is recorded at capacity.
///
/// Both `get` and `put` count as a use.
pub struct LruViewportStore {
    inner: LruCache<PairKey, ViewportWindow>,
}

impl LruViewportStore {
    /// Create a store holding at most `capacity` pairs (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: LruCache::new(cap),
        }
    }

    /// Maximum number of pairs retained.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.cap().get()
    }
}

impl std::fmt::Debug for LruViewportStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruViewportStore")
            .field("len", &self.inner.len())
            .field("capacity", &self.inner.cap())
            .finish()
    }
}

impl ViewportStore for LruViewportStore {
    fn get(&mut self, key: &PairKey) -> Option<ViewportWindow> {
        self.inner.get(key).copied()
    }

    fn put(&mut self, key: PairKey, window: ViewportWindow) {
        self.inner.put(key, window);
    }

    fn remove(&mut self, key: &PairKey) -> Option<ViewportWindow> {
        self.inner.pop(key)
    }

    fn entries(&self) -> Vec<ViewportEntry> {
        // Least recently used first, so re-importing preserves recency order.
        self.inner
            .iter()
            .rev()
            .map(|(key, window)| ViewportEntry {
                key: key.clone(),
                window: *window,
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
