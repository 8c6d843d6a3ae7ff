// crates/tracuu-core/src/diagnostics.rs

//! # Diagnostics Sink
//!
//! A bounded, timestamped log an operator can read back to find out why a
//! query returned nothing ("data source not found" and friends).
//!
//! Entries are plain strings so the presentation layer can show or export
//! them verbatim:
//!
//! ```text
//! [14:02:07.315] [store]: finished reading: 12 lines, 2 records parsed
//! [14:02:07.316] [ERROR] [store]: CRITICAL: data source 'x.txt' not found
//! ```
//!
//! Every entry is mirrored to `tracing`, so a subscriber sees the same stream.
//! Normal and error entries share one bound; the oldest entry is evicted
//! first. An error and its cause chain form one (multi-line) entry.

use chrono::Local;
use std::collections::VecDeque;
use std::error::Error;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Default number of entries retained.
pub const DEFAULT_CAPACITY: usize = 200;

/// Maximum number of `caused by:` lines in one error entry.
const MAX_CAUSE_LINES: usize = 5;

/// Thread-safe ring buffer of diagnostic lines.
#[derive(Debug)]
pub struct Diagnostics {
    capacity: usize,
    entries: Mutex<VecDeque<String>>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink retaining at most `capacity` entries (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Diagnostics {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record a normal entry.
    pub fn record(&self, tag: &str, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::debug!(tag, "{message}");
        self.push(format!("[{}] [{tag}]: {message}", timestamp()));
    }

    /// Record an error entry. The cause's source chain is appended as
    /// indented `caused by:` lines inside the same entry, so eviction never
    /// separates an error from its causes.
    pub fn record_error(&self, tag: &str, message: impl AsRef<str>, cause: Option<&(dyn Error + 'static)>) {
        let message = message.as_ref();
        let entry = match cause {
            Some(err) => {
                tracing::error!(tag, error = %err, "{message}");
                let mut entry = format!("[{}] [ERROR] [{tag}]: {message} {err}", timestamp());
                let mut source = err.source();
                let mut depth = 0;
                while let Some(inner) = source {
                    if depth == MAX_CAUSE_LINES {
                        break;
                    }
                    entry.push_str(&format!("\n    caused by: {inner}"));
                    source = inner.source();
                    depth += 1;
                }
                entry
            }
            None => {
                tracing::error!(tag, "{message}");
                format!("[{}] [ERROR] [{tag}]: {message}", timestamp())
            }
        };
        self.push(entry);
    }

    /// Snapshot of all retained entries, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    /// Remove and return all retained entries, oldest first.
    pub fn drain(&self) -> Vec<String> {
        self.lock().drain(..).collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of retained entries containing `needle`.
    pub fn count_containing(&self, needle: &str) -> usize {
        self.lock().iter().filter(|e| e.contains(needle)).count()
    }

    /// All retained entries joined with `\n`, for copy/export.
    pub fn export(&self) -> String {
        let entries = self.lock();
        let mut out = String::new();
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(entry);
        }
        out
    }

    fn push(&self, entry: String) {
        let mut entries = self.lock();
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    // A panic while holding the lock cannot leave the deque half-updated,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn timestamp() -> String {
    Local::now().format("%H:%M:%S%.3f").to_string()
}
