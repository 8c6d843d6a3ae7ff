//! Basic usage example for tracuu-rs
//!
//! This example demonstrates how to:
//! - Point a store at a data file (or the bundled dataset)
//! - Search new wards and read the grouped result cards
//! - Build map links for the old units
//!
//! Run with:
//!   cargo run --example basic_usage -- "path/to/export.txt" "bàn cờ"

use tracuu_rs::prelude::*;

fn main() {
    println!("=== TraCuu-RS Basic Usage Example ===\n");

    let mut args = std::env::args().skip(1);
    let source = match args.next() {
        Some(path) => DataSource::File(path.into()),
        None => DataSource::bundled(),
    };
    let query = args.next().unwrap_or_else(|| "phường".to_string());

    // Example 1: Load once
    println!("--- Example 1: Load the data ---");
    let store = WardStore::new(source);
    let db = store.ensure_loaded();
    println!("Status: {:?}", store.status());
    let stats = db.stats();
    println!(
        "Records: {}, new provinces: {}, new wards: {}\n",
        stats.records, stats.new_provinces, stats.new_wards
    );

    // Example 2: Search and print cards
    println!("--- Example 2: Search '{query}' ---");
    let results = store.search(&query);
    println!("Cards: {}", results.len());
    for card in results.iter().take(5) {
        println!("{} ({})", card.new_ward, card.new_province);
        println!("  old district: {}, old province: {}", card.old_district, card.old_province);
        for unit in &card.old_units {
            println!("    - {}", unit.name);
        }
    }
    println!();

    // Example 3: Map links
    println!("--- Example 3: Map links ---");
    if let Some(unit) = results.first().and_then(|c| c.old_units.first()) {
        println!("Query: {}", unit.map_query);
        println!("URL:   {}", unit.map_url());
    } else {
        println!("No result to link.");
    }
    println!();

    // Example 4: Repeated searches reuse the cached records
    println!("--- Example 4: Cached data ---");
    let again = store.search(&query);
    println!("Same result on second call: {}", again == results);
}
