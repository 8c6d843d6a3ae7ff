//! Error handling example for tracuu-rs
//!
//! This example demonstrates how a missing data source degrades: searches
//! return nothing, the status says why, and the diagnostics log carries a
//! CRITICAL entry exactly once.

use std::sync::Arc;
use tracuu_rs::loader::open_stream;
use tracuu_rs::prelude::*;

fn main() {
    println!("=== TraCuu-RS Error Handling Example ===\n");

    // Example 1: The low-level loader reports a typed error
    println!("--- Example 1: Opening a missing file ---");
    let missing = std::path::Path::new("does/not/exist.txt");
    match open_stream(missing) {
        Ok(_) => println!("  unexpectedly opened {}", missing.display()),
        Err(e) => {
            println!("  error: {e}");
            println!("  source unavailable: {}", e.is_source_unavailable());
        }
    }
    println!();

    // Example 2: The store never fails, it degrades
    println!("--- Example 2: Searching without data ---");
    let diagnostics = Arc::new(Diagnostics::new());
    let store = WardStore::with_diagnostics(missing, Arc::clone(&diagnostics));
    for query in ["an", "ba", "  "] {
        println!("  search({query:?}) -> {} results", store.search(query).len());
    }
    println!("  status: {:?}", store.status());
    println!();

    // Example 3: Telling "no data" from "no match"
    println!("--- Example 3: Diagnostics ---");
    println!(
        "  CRITICAL entries: {}",
        diagnostics.count_containing("CRITICAL")
    );
    println!("{}", diagnostics.export());
}
