//! FILENAME: core/roster-engine/src/engine.rs
//! Roster Engine - Turns a filtered record list into the pivot grid.
//!
//! Algorithm:
//! 1. Derive the date and employee axes (unique, lexicographically sorted)
//! 2. Bucket records by (employee, date) cell, keeping input order
//! 3. For every cell of the cross product, format display lines
//! 4. Classify each non-empty cell's shift style
//!
//! The builder never fails on field values: bad data ends up as empty cells
//! or `ShiftStyle::None`.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::definition::{FilterAxis, ScheduleRecord};
use crate::options::SortedSet;
use crate::view::{CellContent, GridModel, ShiftStyle};

// ============================================================================
// SHIFT CLASSIFICATION
// ============================================================================

/// Marker families in priority order. Each family lists the diacritic and
/// the plain spelling; matching is a substring test on the lowercased name.
pub const SHIFT_MARKERS: [(&[&str], ShiftStyle); 3] = [
    (&["sáng", "sang"], ShiftStyle::Sang),
    (&["chiều", "chieu"], ShiftStyle::Chieu),
    (&["tối", "toi"], ShiftStyle::Toi),
];

/// Classifies a single shift name. Unknown names are `None`.
pub fn classify_shift(shift_name: &str) -> ShiftStyle {
    let folded = shift_name.to_lowercase();
    SHIFT_MARKERS
        .iter()
        .find(|(markers, _)| markers.iter().any(|m| folded.contains(m)))
        .map(|(_, style)| *style)
        .unwrap_or(ShiftStyle::None)
}

/// More than one matched record is `Mixed`, even when the shift names are
/// identical. A lone record is classified by its shift name.
pub fn classify_cell(records: &[&ScheduleRecord]) -> ShiftStyle {
    match records {
        [] => ShiftStyle::None,
        [single] => classify_shift(&single.shift_name),
        _ => ShiftStyle::Mixed,
    }
}

/// `"<shift> : <position>"`, or `None` when either part is empty.
pub fn format_cell_line(record: &ScheduleRecord) -> Option<String> {
    if record.shift_name.is_empty() || record.position.is_empty() {
        return None;
    }
    Some(format!("{} : {}", record.shift_name, record.position))
}

// ============================================================================
// GRID CALCULATOR
// ============================================================================

type CellKey = (usize, usize);

/// One-shot calculator; holds the intermediate axes and buckets.
pub struct GridCalculator<'a> {
    records: &'a [ScheduleRecord],

    /// Sorted employee names (rows).
    employee_axis: Vec<String>,

    /// Sorted date keys (columns).
    date_axis: Vec<String>,

    /// Records per (row, col), in input order.
    buckets: FxHashMap<CellKey, SmallVec<[&'a ScheduleRecord; 2]>>,
}

impl<'a> GridCalculator<'a> {
    pub fn new(records: &'a [ScheduleRecord]) -> Self {
        GridCalculator {
            records,
            employee_axis: Vec::new(),
            date_axis: Vec::new(),
            buckets: FxHashMap::default(),
        }
    }

    /// Executes the full calculation.
    pub fn calculate(mut self) -> GridModel {
        if self.records.is_empty() {
            return GridModel::no_data();
        }

        // Step 1: axes
        self.build_axes();

        // Step 2: bucket records by cell
        self.bucket_records();

        // Step 3 + 4: materialize the dense cross product
        let cells: Vec<Vec<CellContent>> = (0..self.employee_axis.len())
            .map(|row| {
                (0..self.date_axis.len())
                    .map(|col| self.build_cell(row, col))
                    .collect()
            })
            .collect();

        GridModel {
            date_axis: self.date_axis,
            employee_axis: self.employee_axis,
            cells,
        }
    }

    fn build_axes(&mut self) {
        self.employee_axis = SortedSet::from_field(self.records, FilterAxis::Employee).into_vec();
        self.date_axis = SortedSet::from_field(self.records, FilterAxis::Date).into_vec();
    }

    fn bucket_records(&mut self) {
        let row_index = index_lookup(&self.employee_axis);
        let col_index = index_lookup(&self.date_axis);

        for record in self.records {
            // Both lookups succeed: the axes were built from these records.
            let (Some(&row), Some(&col)) = (
                row_index.get(record.employee_name.as_str()),
                col_index.get(record.work_date.as_str()),
            ) else {
                continue;
            };
            self.buckets.entry((row, col)).or_default().push(record);
        }
    }

    fn build_cell(&self, row: usize, col: usize) -> CellContent {
        let Some(matched) = self.buckets.get(&(row, col)) else {
            return CellContent::Empty;
        };

        let lines: SmallVec<[String; 2]> =
            matched.iter().filter_map(|r| format_cell_line(r)).collect();
        if lines.is_empty() {
            return CellContent::Empty;
        }

        CellContent::Shifts {
            lines,
            style: classify_cell(matched),
            record_count: matched.len(),
        }
    }
}

fn index_lookup(axis: &[String]) -> FxHashMap<&str, usize> {
    axis.iter()
        .enumerate()
        .map(|(i, value)| (value.as_str(), i))
        .collect()
}

/// Builds the employee x date grid from already-filtered records.
pub fn build_grid(records: &[ScheduleRecord]) -> GridModel {
    GridCalculator::new(records).calculate()
}
