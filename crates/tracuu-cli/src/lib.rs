//! tracuu-cli
//! ==========
//!
//! Command-line interface for the `tracuu-core` ward lookup.
//!
//! This crate primarily provides a binary (`tracuu`). The library target
//! exists so docs.rs renders this overview.
//!
//! ```text
//! tracuu --help
//! tracuu search "bàn cờ"
//! tracuu --input data.txt.gz stats
//! tracuu logs
//! ```
//!
//! For programmatic access use the `tracuu-core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
