//! FILENAME: core/roster-engine/src/filter.rs
//! Tri-predicate record filter (employee / shift / date).

use crate::definition::{FilterAxis, FilterCriteria, ScheduleRecord};

/// True if the record satisfies every axis of the criteria.
pub fn record_matches(record: &ScheduleRecord, criteria: &FilterCriteria) -> bool {
    FilterAxis::ALL
        .iter()
        .all(|axis| criteria.get(*axis).accepts(record.field(*axis)))
}

/// Stable filter: surviving records keep their input order. A criterion
/// naming a value that no longer exists simply matches nothing.
pub fn apply_filter(records: &[ScheduleRecord], criteria: &FilterCriteria) -> Vec<ScheduleRecord> {
    if criteria.is_unconstrained() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| record_matches(record, criteria))
        .cloned()
        .collect()
}
