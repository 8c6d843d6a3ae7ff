//! Rendering of result cards for the terminal.

use std::io::{self, Write};
use tracuu_core::{DbStats, GroupedResult};

pub fn print_results(
    out: &mut impl Write,
    query: &str,
    results: &[GroupedResult],
    json: bool,
    maps: bool,
) -> io::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, results)?;
        return writeln!(out);
    }
    if results.is_empty() {
        return writeln!(out, "No wards found matching: {query}");
    }
    for card in results {
        writeln!(out, "{} - {}", card.new_ward, card.new_province)?;
        writeln!(out, "  from {}, {}:", card.old_district, card.old_province)?;
        for unit in &card.old_units {
            if maps {
                writeln!(out, "    - {}  <{}>", unit.name, unit.map_url())?;
            } else {
                writeln!(out, "    - {}", unit.name)?;
            }
        }
    }
    Ok(())
}

pub fn print_stats(out: &mut impl Write, stats: &DbStats, json: bool) -> io::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, stats)?;
        return writeln!(out);
    }
    writeln!(out, "Data statistics:")?;
    writeln!(out, "  Records: {}", stats.records)?;
    writeln!(out, "  New provinces: {}", stats.new_provinces)?;
    writeln!(out, "  New wards: {}", stats.new_wards)?;
    writeln!(out, "  Old provinces: {}", stats.old_provinces)
}
