//! tracuu-rs: umbrella crate re-exporting `tracuu-core` for the demos.
pub use tracuu_core::*;
