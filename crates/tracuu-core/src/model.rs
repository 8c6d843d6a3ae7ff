// crates/tracuu-core/src/model.rs

//! Domain types: the parsed record set and the grouped query results.

use crate::text::NameMatch;
use serde::{Deserialize, Serialize};

/// Base URL used by [`OldUnitInfo::map_url`].
pub const MAP_BASE_URL: &str = "http://maps.google.com/maps";

/// One merge mapping: an old ward and the new ward it was merged into.
///
/// Fields appear in the same order as the six lines of a source block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardRecord {
    /// Destination province name.
    pub new_province: String,
    /// Destination ward name. This is the search key.
    pub new_ward: String,
    /// Old ward as displayed, may carry a legacy prefix such as "Phường 1".
    pub old_ward_display: String,
    /// Old ward canonical code/name. Not used by search.
    pub old_ward: String,
    pub old_district: String,
    pub old_province: String,
}

impl WardRecord {
    /// Build a record from a block of exactly six cleaned lines.
    ///
    /// Returns `None` for any other line count.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Option<Self> {
        match lines {
            [new_province, new_ward, old_ward_display, old_ward, old_district, old_province] => {
                Some(WardRecord {
                    new_province: new_province.as_ref().to_string(),
                    new_ward: new_ward.as_ref().to_string(),
                    old_ward_display: old_ward_display.as_ref().to_string(),
                    old_ward: old_ward.as_ref().to_string(),
                    old_district: old_district.as_ref().to_string(),
                    old_province: old_province.as_ref().to_string(),
                })
            }
            _ => None,
        }
    }

    /// Grouping key for this record. Note that `new_ward` is not part of it.
    #[inline]
    pub fn group_key(&self) -> GroupKey<'_> {
        GroupKey {
            new_province: &self.new_province,
            old_province: &self.old_province,
            old_district: &self.old_district,
        }
    }

    /// The old unit this record contributes to a result card.
    pub fn old_unit(&self) -> OldUnitInfo {
        OldUnitInfo {
            name: self.old_ward_display.clone(),
            map_query: format!(
                "{}, {}, {}",
                self.old_ward_display, self.old_district, self.old_province
            ),
        }
    }
}

impl NameMatch for WardRecord {
    fn name_str(&self) -> &str {
        &self.new_ward
    }
}

/// Composite key `(new_province, old_province, old_district)` used to collapse
/// several old wards into one displayed card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupKey<'a> {
    pub new_province: &'a str,
    pub old_province: &'a str,
    pub old_district: &'a str,
}

/// One old unit listed on a result card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OldUnitInfo {
    /// Display name of the old ward.
    pub name: String,
    /// `"{name}, {old_district}, {old_province}"`, unescaped.
    pub map_query: String,
}

impl OldUnitInfo {
    /// Map link for this unit with the query form-url-encoded.
    ///
    /// ```rust
    /// use tracuu_core::OldUnitInfo;
    ///
    /// let unit = OldUnitInfo {
    ///     name: "Phường 1".into(),
    ///     map_query: "Phường 1, Quận 3, TP HCM".into(),
    /// };
    /// assert_eq!(
    ///     unit.map_url(),
    ///     "http://maps.google.com/maps?q=Ph%C6%B0%E1%BB%9Dng+1%2C+Qu%E1%BA%ADn+3%2C+TP+HCM"
    /// );
    /// ```
    pub fn map_url(&self) -> String {
        let encoded: String =
            url::form_urlencoded::byte_serialize(self.map_query.as_bytes()).collect();
        format!("{MAP_BASE_URL}?q={encoded}")
    }
}

/// One visible result card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedResult {
    pub new_province: String,
    pub new_ward: String,
    pub old_district: String,
    pub old_province: String,
    /// Old units in filtered order, duplicates preserved.
    pub old_units: Vec<OldUnitInfo>,
}

impl GroupedResult {
    pub(crate) fn start(record: &WardRecord) -> Self {
        GroupedResult {
            new_province: record.new_province.clone(),
            new_ward: record.new_ward.clone(),
            old_district: record.old_district.clone(),
            old_province: record.old_province.clone(),
            old_units: vec![record.old_unit()],
        }
    }

    /// Fold another record of the same group into this card.
    ///
    /// The displayed destination is taken from the record being merged, so
    /// the last-seen record wins when several new wards share a key.
    pub(crate) fn merge(&mut self, record: &WardRecord) {
        self.new_province.clone_from(&record.new_province);
        self.new_ward.clone_from(&record.new_ward);
        self.old_units.push(record.old_unit());
    }
}

/// The loaded record set. Immutable once built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardDb {
    pub records: Vec<WardRecord>,
}

impl WardDb {
    pub fn new(records: Vec<WardRecord>) -> Self {
        WardDb { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Simple aggregate statistics for the loaded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbStats {
    pub records: usize,
    pub new_provinces: usize,
    pub new_wards: usize,
    pub old_provinces: usize,
}
