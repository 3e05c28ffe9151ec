//! "Last request wins" ordering for overlapping refreshes.
//!
//! Every refresh takes a [`Ticket`] before it starts fetching and asks to be
//! admitted once its result is ready. A result is applied only if no newer
//! ticket has been admitted in the meantime, so a slow, older response can
//! never overwrite a faster, newer one.

#[cfg(loom)]
use loom::sync::atomic::{AtomicU64, Ordering};
#[cfg(not(loom))]
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Position of one request in issue order. Tickets start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Ticket(u64);

impl Ticket {
    /// Raw sequence number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lock-free monotonic request counter for one consumer.
///
/// Use one sequencer per independent consumer (the chart and the table each
/// have their own), so a table refresh never supersedes a chart refresh.
pub struct RequestSequencer {
    issued: AtomicU64,
    admitted: AtomicU64,
}

impl Default for RequestSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RequestSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSequencer")
            .field("issued", &self.last_issued())
            .field("admitted", &self.last_admitted())
            .finish()
    }
}

impl RequestSequencer {
    /// Create a sequencer with nothing issued or admitted.
    #[must_use]
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            admitted: AtomicU64::new(0),
        }
    }

    /// Take the next ticket. Tickets are strictly increasing.
    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Try to apply the result of `ticket`.
    ///
    /// Returns `false` if a newer ticket was already admitted; the caller
    /// must drop its result. Otherwise records `ticket` as the latest
    /// admitted and returns `true`.
    pub fn admit(&self, ticket: Ticket) -> bool {
        let mut last = self.admitted.load(Ordering::Acquire);
        loop {
            if ticket.0 < last {
                return false;
            }
            match self.admitted.compare_exchange(
                last,
                ticket.0,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(actual) => last = actual,
            }
        }
    }

    /// Sequence number of the newest admitted ticket, or 0 if none.
    pub fn last_admitted(&self) -> u64 {
        self.admitted.load(Ordering::Acquire)
    }

    /// Sequence number of the newest issued ticket, or 0 if none.
    pub fn last_issued(&self) -> u64 {
        self.issued.load(Ordering::Acquire)
    }
}
