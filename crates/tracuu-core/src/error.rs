// crates/tracuu-core/src/error.rs

//! Error taxonomy for loading the ward data source.
//!
//! None of these cross [`WardStore::search`](crate::store::WardStore::search):
//! the store turns them into diagnostics and a degraded [`LoadStatus`](crate::store::LoadStatus).
//! They are returned by the lower-level loader functions so callers can
//! compose their own pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating or reading a data source.
#[derive(Debug, Error)]
pub enum TraCuuError {
    /// The data resource cannot be located or opened.
    #[error("data source not found at {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source looked compressed but could not be decoded.
    #[error("decompression failed: {0}")]
    Decompress(String),
}

impl TraCuuError {
    /// True when the resource is categorically absent (as opposed to a read failure).
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, TraCuuError::SourceUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, TraCuuError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn source_unavailable_keeps_io_cause() {
        let err = TraCuuError::SourceUnavailable {
            path: PathBuf::from("data/x.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.is_source_unavailable());
        assert_eq!(err.to_string(), "data source not found at data/x.txt: gone");
        assert_eq!(err.source().map(|s| s.to_string()), Some("gone".to_string()));
    }

    #[test]
    fn decompress_is_not_source_unavailable() {
        assert!(!TraCuuError::Decompress("bad header".into()).is_source_unavailable());
    }
}
