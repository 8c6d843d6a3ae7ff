// crates/tracuu-core/src/store.rs

//! # Data Store
//!
//! Owns the data source and the parsed record set. The first call to
//! [`WardStore::ensure_loaded`] reads and parses the source; every later call
//! returns the same records without touching the source again. A failed or
//! empty load is cached too, so a missing file costs one `open` per process,
//! not one per query.
//!
//! ```rust
//! use tracuu_core::{DataSource, WardStore};
//!
//! let text = "Hanoi\nWardX\nOld Ward 1\now1\nDistrict A\nOld Province\n";
//! let store = WardStore::new(DataSource::Inline(text.to_string()));
//!
//! let results = store.search("ward");
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].old_units[0].map_query, "Old Ward 1, District A, Old Province");
//! ```

use crate::diagnostics::Diagnostics;
use crate::loader::{self, DataSource};
use crate::model::{GroupedResult, WardDb, WardRecord};
use crate::parser::parse_reader;
use crate::search::{group_results, WardSearch};
use crate::session::{RequestGate, RequestTicket};
use crate::text::normalize_query;
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::sync::Arc;

const TAG: &str = "store";

/// Outcome of the one-time load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// `ensure_loaded` has not run yet.
    NotLoaded,
    /// The whole source was read.
    Loaded { records: usize },
    /// Reading failed mid-stream; the records before the failure were kept.
    Partial { records: usize },
    /// The source was read but held no valid record.
    Empty,
    /// The source could not be located or opened.
    SourceUnavailable,
}

impl LoadStatus {
    /// True when searches can return something.
    pub fn has_data(&self) -> bool {
        matches!(
            self,
            LoadStatus::Loaded { .. } | LoadStatus::Partial { .. }
        )
    }
}

#[derive(Debug)]
struct Loaded {
    db: WardDb,
    status: LoadStatus,
}

/// Lazily loaded, read-only record store.
///
/// Construct one per application and share it (it is `Send + Sync`).
#[derive(Debug)]
pub struct WardStore {
    source: DataSource,
    loaded: OnceCell<Loaded>,
    diagnostics: Arc<Diagnostics>,
}

impl WardStore {
    /// A store with its own diagnostics sink.
    pub fn new(source: impl Into<DataSource>) -> Self {
        Self::with_diagnostics(source, Arc::new(Diagnostics::new()))
    }

    /// A store writing to a shared diagnostics sink.
    pub fn with_diagnostics(source: impl Into<DataSource>, diagnostics: Arc<Diagnostics>) -> Self {
        WardStore {
            source: source.into(),
            loaded: OnceCell::new(),
            diagnostics,
        }
    }

    /// A store over the bundled dataset.
    pub fn open_default() -> Self {
        Self::new(DataSource::bundled())
    }

    pub fn default_data_dir() -> PathBuf {
        loader::default_data_dir()
    }

    pub fn default_dataset_filename() -> &'static str {
        loader::DATA_FILE_NAME
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn diagnostics(&self) -> &Arc<Diagnostics> {
        &self.diagnostics
    }

    pub fn status(&self) -> LoadStatus {
        self.loaded
            .get()
            .map_or(LoadStatus::NotLoaded, |loaded| loaded.status)
    }

    /// Load once, then return the cached record set.
    pub fn ensure_loaded(&self) -> &WardDb {
        &self.loaded.get_or_init(|| self.load()).db
    }

    /// Convenience view of the loaded records.
    pub fn records(&self) -> &[WardRecord] {
        &self.ensure_loaded().records
    }

    /// The single query entry point.
    ///
    /// Never fails: a missing source behaves like "no matches" and is
    /// reported through [`WardStore::status`] and the diagnostics.
    pub fn search(&self, query: &str) -> Vec<GroupedResult> {
        if normalize_query(query).is_none() {
            return Vec::new();
        }
        self.diagnostics
            .record(TAG, format!("search started: '{query}'"));

        let db = self.ensure_loaded();
        if db.is_empty() {
            self.diagnostics
                .record_error(TAG, "no records loaded, cannot search", None);
            return Vec::new();
        }

        let matches = db.find_by_new_ward(query);
        self.diagnostics
            .record(TAG, format!("raw matches: {}", matches.len()));
        let grouped = group_results(matches);
        self.diagnostics
            .record(TAG, format!("grouped results: {}", grouped.len()));
        grouped
    }

    /// Run [`WardStore::search`] for `ticket`, discarding the result if a newer
    /// request was issued on `gate` before or while it ran.
    pub fn search_if_current(
        &self,
        gate: &RequestGate,
        ticket: RequestTicket,
        query: &str,
    ) -> Option<Vec<GroupedResult>> {
        if !gate.is_current(ticket) {
            return None;
        }
        let results = self.search(query);
        gate.is_current(ticket).then_some(results)
    }

    fn load(&self) -> Loaded {
        let name = self.source.describe();
        self.diagnostics
            .record(TAG, format!("data not loaded yet, reading '{name}'"));

        let reader = match self.source.open() {
            Ok(reader) => reader,
            Err(err) => {
                if let DataSource::File(path) = &self.source {
                    if let Some(dir) = path.parent() {
                        self.diagnostics.record(
                            TAG,
                            format!(
                                "files in {}: {}",
                                dir.display(),
                                loader::list_dir(dir).join(", ")
                            ),
                        );
                    }
                }
                let message = if err.is_source_unavailable() {
                    format!("CRITICAL: data source '{name}' not found")
                } else {
                    format!("CRITICAL: cannot open data source '{name}'")
                };
                self.diagnostics.record_error(TAG, message, Some(&err));
                return Loaded {
                    db: WardDb::default(),
                    status: LoadStatus::SourceUnavailable,
                };
            }
        };

        let outcome = parse_reader(reader);
        let records = outcome.records.len();
        let status = match &outcome.error {
            Some(err) => {
                self.diagnostics.record_error(
                    TAG,
                    format!(
                        "read failed after {} lines, keeping {records} records",
                        outcome.lines_read
                    ),
                    Some(err),
                );
                if records == 0 {
                    LoadStatus::Empty
                } else {
                    LoadStatus::Partial { records }
                }
            }
            None => {
                self.diagnostics.record(
                    TAG,
                    format!(
                        "finished reading: {} lines, {records} records parsed",
                        outcome.lines_read
                    ),
                );
                if records == 0 {
                    LoadStatus::Empty
                } else {
                    LoadStatus::Loaded { records }
                }
            }
        };
        if outcome.dropped_blocks > 0 {
            tracing::debug!(dropped = outcome.dropped_blocks, "malformed blocks skipped");
        }
        if status == LoadStatus::Empty {
            self.diagnostics.record_error(
                TAG,
                format!("CRITICAL: data source '{name}' yielded no records"),
                None,
            );
        }

        Loaded {
            db: WardDb::new(outcome.records),
            status,
        }
    }
}
