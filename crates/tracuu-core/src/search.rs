// crates/tracuu-core/src/search.rs

//! # Query Engine
//!
//! Case-insensitive substring search on the new ward name, followed by
//! grouping into result cards keyed by
//! `(new_province, old_province, old_district)`.

use crate::model::{DbStats, GroupKey, GroupedResult, WardDb, WardRecord};
use crate::text::{normalize_query, NameMatch};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Search operations over a loaded record set.
pub trait WardSearch {
    fn stats(&self) -> DbStats;

    /// Records whose new ward contains `query` (trimmed, case-folded).
    ///
    /// A blank query matches nothing.
    fn find_by_new_ward(&self, query: &str) -> Vec<&WardRecord>;

    /// Filter and group. Groups appear in first-seen order.
    fn search(&self, query: &str) -> Vec<GroupedResult>;
}

impl WardSearch for WardDb {
    fn stats(&self) -> DbStats {
        stats(&self.records)
    }

    fn find_by_new_ward(&self, query: &str) -> Vec<&WardRecord> {
        filter_records(&self.records, query)
    }

    fn search(&self, query: &str) -> Vec<GroupedResult> {
        search(&self.records, query)
    }
}

/// Linear scan keeping every record whose folded `new_ward` contains the
/// normalized query.
pub fn filter_records<'a>(records: &'a [WardRecord], query: &str) -> Vec<&'a WardRecord> {
    let Some(q) = normalize_query(query) else {
        return Vec::new();
    };
    records
        .iter()
        .filter(|r| r.name_contains_folded(&q))
        .collect()
}

/// Collapse records into cards.
///
/// Old units accumulate in input order without de-duplication. The displayed
/// `new_ward`/`new_province` of a card come from the last record merged into
/// it.
pub fn group_results<'a, I>(records: I) -> Vec<GroupedResult>
where
    I: IntoIterator<Item = &'a WardRecord>,
{
    let mut slots: HashMap<GroupKey<'a>, usize> = HashMap::new();
    let mut out: Vec<GroupedResult> = Vec::new();

    for record in records {
        match slots.entry(record.group_key()) {
            Entry::Occupied(slot) => out[*slot.get()].merge(record),
            Entry::Vacant(slot) => {
                slot.insert(out.len());
                out.push(GroupedResult::start(record));
            }
        }
    }
    out
}

/// Filter then group. Empty for an empty or all-whitespace query.
pub fn search(records: &[WardRecord], query: &str) -> Vec<GroupedResult> {
    group_results(filter_records(records, query))
}

fn stats(records: &[WardRecord]) -> DbStats {
    let mut new_provinces = HashSet::new();
    let mut new_wards = HashSet::new();
    let mut old_provinces = HashSet::new();
    for r in records {
        new_provinces.insert(r.new_province.as_str());
        new_wards.insert((r.new_province.as_str(), r.new_ward.as_str()));
        old_provinces.insert(r.old_province.as_str());
    }
    DbStats {
        records: records.len(),
        new_provinces: new_provinces.len(),
        new_wards: new_wards.len(),
        old_provinces: old_provinces.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OldUnitInfo;

    fn rec(np: &str, nw: &str, owd: &str, ow: &str, od: &str, op: &str) -> WardRecord {
        WardRecord::from_lines(&[np, nw, owd, ow, od, op]).unwrap()
    }

    fn db() -> WardDb {
        WardDb::new(vec![
            rec("Hanoi", "WardX", "Old Ward 1", "ow1", "District A", "Old Province"),
            rec("Hanoi", "WardX", "Old Ward 2", "ow2", "District A", "Old Province"),
            rec("Hà Nội", "Phường An Khánh", "Xã An Khánh", "ak", "Hoài Đức", "Hà Nội"),
            rec("Hà Nội", "Phường Ba Đình", "Phường Phúc Xá", "px", "Ba Đình", "Hà Nội"),
        ])
    }

    #[test]
    fn blank_query_is_empty() {
        let db = db();
        assert!(db.search("").is_empty());
        assert!(db.search("   ").is_empty());
        assert!(db.find_by_new_ward("\t").is_empty());
    }

    #[test]
    fn concrete_grouping_scenario() {
        let results = db().search("ward");
        assert_eq!(results.len(), 1);
        let card = &results[0];
        assert_eq!(card.new_ward, "WardX");
        assert_eq!(card.new_province, "Hanoi");
        assert_eq!(card.old_district, "District A");
        assert_eq!(card.old_province, "Old Province");
        assert_eq!(
            card.old_units,
            vec![
                OldUnitInfo {
                    name: "Old Ward 1".into(),
                    map_query: "Old Ward 1, District A, Old Province".into(),
                },
                OldUnitInfo {
                    name: "Old Ward 2".into(),
                    map_query: "Old Ward 2, District A, Old Province".into(),
                },
            ]
        );
    }

    #[test]
    fn case_insensitive() {
        let db = db();
        let upper = db.search("AN KH");
        let lower = db.search("an kh");
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
        assert_eq!(upper[0].new_ward, "Phường An Khánh");
    }

    #[test]
    fn query_is_trimmed() {
        assert_eq!(db().search("  ba đình  ").len(), 1);
    }

    #[test]
    fn diacritics_are_not_stripped() {
        assert!(db().search("ba dinh").is_empty());
    }

    #[test]
    fn only_new_ward_is_searched() {
        // "Hoài Đức" is an old district, not a new ward.
        assert!(db().search("hoài").is_empty());
    }

    #[test]
    fn idempotent() {
        let db = db();
        assert_eq!(db.search("phường"), db.search("phường"));
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let results = db().search("a");
        let wards: Vec<_> = results.iter().map(|r| r.new_ward.as_str()).collect();
        assert_eq!(wards, vec!["WardX", "Phường An Khánh", "Phường Ba Đình"]);
    }

    #[test]
    fn last_seen_new_ward_wins_within_group() {
        let records = vec![
            rec("P", "Alpha", "o1", "o1", "D", "OP"),
            rec("P", "Alphabet", "o2", "o2", "D", "OP"),
        ];
        let results = search(&records, "alpha");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].new_ward, "Alphabet");
        assert_eq!(results[0].old_units.len(), 2);
    }

    #[test]
    fn duplicates_are_preserved() {
        let r = rec("P", "W", "o", "o", "D", "OP");
        let results = group_results([&r, &r, &r]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].old_units.len(), 3);
    }

    #[test]
    fn different_district_splits_groups() {
        let records = vec![
            rec("P", "W", "o1", "o1", "D1", "OP"),
            rec("P", "W", "o2", "o2", "D2", "OP"),
            rec("P", "W", "o3", "o3", "D1", "OP"),
        ];
        let results = search(&records, "w");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].old_district, "D1");
        assert_eq!(results[0].old_units.len(), 2);
        assert_eq!(results[1].old_district, "D2");
    }

    #[test]
    fn stats_counts_distinct_values() {
        let stats = db().stats();
        assert_eq!(stats.records, 4);
        assert_eq!(stats.new_provinces, 2);
        assert_eq!(stats.new_wards, 3);
        assert_eq!(stats.old_provinces, 2);
    }
}
