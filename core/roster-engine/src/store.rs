//! FILENAME: core/roster-engine/src/store.rs
//! Record Store - The full fetched set and the current filtered subset.
//!
//! Single writer, full replace. Nothing derived is cached here beyond the
//! filtered subset itself; options and the grid are recomputed on demand.

use crate::definition::{FilterAxis, FilterCriteria, ScheduleRecord};
use crate::filter::apply_filter;
use crate::options::{derive_options, FilterOptions, SortedSet};

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    all: Vec<ScheduleRecord>,
    filtered: Vec<ScheduleRecord>,
    /// Date options of the last non-empty filtered subset.
    shown_dates: SortedSet,
}

impl RecordStore {
    pub fn new() -> Self {
        RecordStore::default()
    }

    /// Replaces the full set. The filtered subset resets to everything.
    pub fn replace(&mut self, records: Vec<ScheduleRecord>) {
        self.shown_dates = SortedSet::from_field(&records, FilterAxis::Date);
        self.filtered = records.clone();
        self.all = records;
    }

    /// Recomputes the filtered subset from the full set. An empty result
    /// leaves the date options as they were.
    pub fn refilter(&mut self, criteria: &FilterCriteria) -> &[ScheduleRecord] {
        self.filtered = apply_filter(&self.all, criteria);
        if !self.filtered.is_empty() {
            self.shown_dates = SortedSet::from_field(&self.filtered, FilterAxis::Date);
        }
        &self.filtered
    }

    pub fn all(&self) -> &[ScheduleRecord] {
        &self.all
    }

    pub fn filtered(&self) -> &[ScheduleRecord] {
        &self.filtered
    }

    /// Employee and shift options come from the full set; date options from
    /// the last non-empty filtered subset (the dates last shown as columns).
    pub fn filter_options(&self) -> FilterOptions {
        let full = derive_options(&self.all);
        FilterOptions {
            employees: full.employees,
            shifts: full.shifts,
            dates: self.shown_dates.clone(),
        }
    }
}
