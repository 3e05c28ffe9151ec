//! Visible time window state, persisted per series pair.
//!
//! - `store`: the key-value seam (`ViewportStore`) and its in-memory and
//!   LRU-bounded implementations
//! - `manager`: record/clear/resolve operations and the default window rule
/// Viewport manager: pan/zoom bookkeeping and default windows.
pub mod manager;
/// Storage backends for persisted viewport windows.
pub mod store;

pub use manager::ViewportManager;
pub use store::{LruViewportStore, MemoryViewportStore, ViewportStore};
