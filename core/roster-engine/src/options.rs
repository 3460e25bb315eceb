//! FILENAME: core/roster-engine/src/options.rs
//! Option Sets - Sorted unique values per axis.
//!
//! Every axis (filter drop-downs as well as grid rows/columns) is derived the
//! same way: pull one field from each record, deduplicate, and sort by the
//! raw string value. `SortedSet` is the container that enforces both rules.
//!
//! Ordering is byte-lexicographic on the raw string. Dates are NOT compared
//! as calendar values; see `is_calendar_ordered`.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::definition::{FilterAxis, ScheduleRecord};

// ============================================================================
// SORTED SET
// ============================================================================

/// Ordered container of unique strings (ascending, lexicographic).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortedSet {
    values: BTreeSet<String>,
}

impl SortedSet {
    /// Builds the set of one field across all records.
    pub fn from_field<'a, I>(records: I, axis: FilterAxis) -> Self
    where
        I: IntoIterator<Item = &'a ScheduleRecord>,
    {
        records.into_iter().map(|r| r.field(axis)).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.values.iter().cloned().collect()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.values.into_iter().collect()
    }
}

impl<'a> FromIterator<&'a str> for SortedSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        SortedSet {
            values: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

impl FromIterator<String> for SortedSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        SortedSet {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SortedSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

// ============================================================================
// FILTER OPTIONS
// ============================================================================

/// Option sets for the three filter drop-downs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub employees: SortedSet,
    pub shifts: SortedSet,
    pub dates: SortedSet,
}

/// Derives the unique, sorted option sets from a record collection.
/// Missing fields are already empty strings and take part like any value.
pub fn derive_options(records: &[ScheduleRecord]) -> FilterOptions {
    FilterOptions {
        employees: SortedSet::from_field(records, FilterAxis::Employee),
        shifts: SortedSet::from_field(records, FilterAxis::Shift),
        dates: SortedSet::from_field(records, FilterAxis::Date),
    }
}

/// True when the lexicographic order of `dates` is also calendar order.
/// Holds whenever every key is a fixed-width `YYYY-MM-DD` date (optionally
/// followed by a time part).
pub fn is_calendar_ordered(dates: &SortedSet) -> bool {
    let mut previous: Option<NaiveDate> = None;
    for raw in dates.iter() {
        let Some(head) = raw.get(..10) else {
            return false;
        };
        let Ok(date) = NaiveDate::parse_from_str(head, "%Y-%m-%d") else {
            return false;
        };
        if let Some(prev) = previous {
            if date < prev {
                return false;
            }
        }
        previous = Some(date);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<ScheduleRecord> {
        vec![
            ScheduleRecord::new("Bình", "Tối", "2024-01-02", "Bếp"),
            ScheduleRecord::new("An", "Sáng", "2024-01-01", "Lễ tân"),
            ScheduleRecord::new("Bình", "Sáng", "2024-01-01", "Bếp"),
            ScheduleRecord::new("", "Chiều", "2024-01-03", ""),
        ]
    }

    #[test]
    fn test_derive_options_dedups_and_sorts() {
        let options = derive_options(&records());
        assert_eq!(options.employees.to_vec(), vec!["", "An", "Bình"]);
        assert_eq!(options.shifts.to_vec(), vec!["Chiều", "Sáng", "Tối"]);
        assert_eq!(
            options.dates.to_vec(),
            vec!["2024-01-01", "2024-01-02", "2024-01-03"]
        );
    }

    #[test]
    fn test_derive_options_empty() {
        let options = derive_options(&[]);
        assert!(options.employees.is_empty());
        assert!(options.shifts.is_empty());
        assert!(options.dates.is_empty());
    }

    #[test]
    fn test_sorted_set_dedups_on_collect() {
        let set: SortedSet = ["b", "a", "c", "a"].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.into_vec(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_is_lexicographic_not_calendar() {
        let dates: SortedSet = ["2024-1-10", "2024-1-9"].into_iter().collect();
        assert_eq!(dates.to_vec(), vec!["2024-1-10", "2024-1-9"]);
        assert!(!is_calendar_ordered(&dates));

        let iso: SortedSet = ["2024-01-10", "2024-01-09", "2023-12-31"].into_iter().collect();
        assert!(is_calendar_ordered(&iso));
    }

    #[test]
    fn test_sorted_set_serializes_as_array() {
        let set: SortedSet = ["Tối", "Sáng"].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["Sáng","Tối"]"#);
    }
}
