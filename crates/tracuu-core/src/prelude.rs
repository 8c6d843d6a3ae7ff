//! tracuu-core prelude: bring common types and traits into scope for demos.

pub use crate::diagnostics::Diagnostics;
pub use crate::error::{Result, TraCuuError};
pub use crate::loader::DataSource;
pub use crate::model::{DbStats, GroupedResult, OldUnitInfo, WardDb, WardRecord};
pub use crate::search::WardSearch;
pub use crate::session::{QueryDebouncer, RequestGate, DEFAULT_DEBOUNCE};
pub use crate::store::{LoadStatus, WardStore};
pub use crate::text::NameMatch;
