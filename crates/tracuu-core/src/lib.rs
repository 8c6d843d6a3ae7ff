// crates/tracuu-core/src/lib.rs

//! # tracuu-core
//!
//! Offline lookup that maps the wards created by the 2025 Vietnamese
//! administrative restructuring back to the old wards, districts and
//! provinces merged into them.
//!
//! Pipeline: [`WardStore::search`] → load once ([`parser`]) → filter and
//! group ([`search`]) → [`GroupedResult`] cards. [`diagnostics`] keeps a
//! bounded log of what happened along the way.

pub mod diagnostics;
pub mod error;
pub mod loader;
pub mod model;
pub mod parser;
pub mod search;
pub mod session;
pub mod store;
pub mod text;

// Re-exports
pub use crate::diagnostics::Diagnostics;
pub use crate::error::{Result, TraCuuError};
pub use crate::loader::DataSource;
pub use crate::model::{DbStats, GroupKey, GroupedResult, OldUnitInfo, WardDb, WardRecord};
// Export the Search Trait
pub use crate::search::WardSearch;
pub use crate::session::{QueryDebouncer, RequestGate, RequestTicket};
pub use crate::store::{LoadStatus, WardStore};

pub mod prelude;
