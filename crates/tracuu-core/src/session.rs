// crates/tracuu-core/src/session.rs

//! Caller-side sequencing for interactive search.
//!
//! The query engine is synchronous and keeps no per-call state. Front ends
//! that fire a search per keystroke use these helpers so only the latest
//! request is shown:
//!
//! - [`RequestGate`] hands out monotonically increasing tickets; a result is
//!   only worth showing if its ticket is still the newest.
//! - [`QueryDebouncer`] holds back a query until the input has been quiet for
//!   a window (300 ms by default).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Default quiet period before a typed query is searched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Identifies one search request issued through a [`RequestGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Latest-request-wins generation counter.
#[derive(Debug, Default)]
pub struct RequestGate {
    latest: AtomicU64,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding every earlier one.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }
}

/// Single-slot debouncer: a newer query replaces the pending one and restarts
/// the window.
#[derive(Debug, Clone)]
pub struct QueryDebouncer {
    window: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for QueryDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl QueryDebouncer {
    pub fn new(window: Duration) -> Self {
        QueryDebouncer {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record input received at `now`.
    pub fn push(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some((query.into(), now));
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending query becomes ready, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.window)
    }

    /// Take the pending query once the window has elapsed since its last update.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.pending.take().map(|(q, _)| q),
            _ => None,
        }
    }

    /// Take the pending query regardless of the window (input closed).
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|(q, _)| q)
    }
}
