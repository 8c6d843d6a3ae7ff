// crates/tracuu-core/src/loader.rs

//! # Data Loader
//!
//! Handles the physical layer (locating, opening, decompressing) and hands a
//! buffered reader to the [`parser`](crate::parser).

use crate::error::{Result, TraCuuError};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

/// File name of the bundled dataset.
pub const DATA_FILE_NAME: &str = "Tra cuu xa_processed.txt";

/// Where the records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A file on disk, optionally gzip-compressed (`.gz`).
    File(PathBuf),
    /// Text already in memory (embedded resource, tests).
    Inline(String),
}

impl DataSource {
    /// The bundled dataset next to this crate's manifest.
    pub fn bundled() -> Self {
        DataSource::File(default_data_dir().join(DATA_FILE_NAME))
    }

    /// Human-readable name for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            DataSource::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            DataSource::Inline(_) => "<inline>".to_string(),
        }
    }

    /// Open the source for line reading.
    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        match self {
            DataSource::File(path) => open_stream(path),
            DataSource::Inline(text) => Ok(Box::new(Cursor::new(text.clone().into_bytes()))),
        }
    }
}

impl From<PathBuf> for DataSource {
    fn from(path: PathBuf) -> Self {
        DataSource::File(path)
    }
}

impl From<&Path> for DataSource {
    fn from(path: &Path) -> Self {
        DataSource::File(path.to_path_buf())
    }
}

/// Directory holding the bundled dataset.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Opens a file, buffers it, and wraps it in a gzip decoder when the path
/// ends in `.gz`. The caller never sees the compression.
pub fn open_stream(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|source| TraCuuError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    if !is_gzip_path(path) {
        return Ok(Box::new(BufReader::new(file)));
    }

    #[cfg(feature = "compact")]
    {
        use flate2::read::GzDecoder;
        Ok(Box::new(BufReader::new(GzDecoder::new(BufReader::new(file)))))
    }

    #[cfg(not(feature = "compact"))]
    {
        drop(file);
        Err(TraCuuError::Decompress(format!(
            "{} is gzip-compressed but the `compact` feature is disabled",
            path.display()
        )))
    }
}

fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Names of the entries in `dir`, sorted. Empty if the directory is unreadable.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|rd| {
            rd.filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn missing_file_is_source_unavailable() {
        let err = match open_stream(Path::new("/definitely/not/here.txt")) {
            Ok(_) => panic!("expected an error"),
            Err(e) => e,
        };
        assert!(err.is_source_unavailable());
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn inline_source_reads_back() {
        let mut out = String::new();
        DataSource::Inline("a\nb\n".into())
            .open()
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, "a\nb\n");
    }

    #[test]
    fn describe_uses_file_name() {
        assert_eq!(DataSource::bundled().describe(), DATA_FILE_NAME);
        assert_eq!(DataSource::Inline(String::new()).describe(), "<inline>");
    }

    #[test]
    fn gzip_detection_is_extension_based() {
        assert!(is_gzip_path(Path::new("data/x.txt.gz")));
        assert!(is_gzip_path(Path::new("X.GZ")));
        assert!(!is_gzip_path(Path::new("x.txt")));
    }

    #[test]
    fn list_dir_of_missing_dir_is_empty() {
        assert!(list_dir(Path::new("/definitely/not/here")).is_empty());
    }
}
