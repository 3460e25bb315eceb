//! FILENAME: core/roster-engine/src/view.rs
//! Roster View - The pivot grid handed to the presentation layer.
//!
//! Rows are employees, columns are dates. Cells are stored dense and
//! row-major: `cells[employee_index][date_index]`. An empty grid (no axes)
//! is the explicit "no data" state, not an error.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Placeholder the presentation layer shows for an empty cell.
pub const EMPTY_CELL_PLACEHOLDER: &str = "-";

/// Separator between display lines of a multi-record cell.
pub const LINE_SEPARATOR: &str = "\n\n";

// ============================================================================
// SHIFT STYLE
// ============================================================================

/// Visual category of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShiftStyle {
    #[default]
    None,
    Sang,
    Chieu,
    Toi,
    Mixed,
}

impl ShiftStyle {
    /// CSS class used by the web renderer. `None` has no class.
    pub fn css_class(&self) -> &'static str {
        match self {
            ShiftStyle::None => "",
            ShiftStyle::Sang => "shift-sang",
            ShiftStyle::Chieu => "shift-chieu",
            ShiftStyle::Toi => "shift-toi",
            ShiftStyle::Mixed => "shift-mixed",
        }
    }
}

// ============================================================================
// CELL CONTENT
// ============================================================================

/// Content of one (employee, date) intersection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    /// No record, or no record with a usable display line.
    Empty,
    Shifts {
        /// One `"<shift> : <position>"` line per contributing record.
        lines: SmallVec<[String; 2]>,
        style: ShiftStyle,
        /// All records matched to the cell, including ones without a line.
        record_count: usize,
    },
}

impl CellContent {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellContent::Empty)
    }

    pub fn lines(&self) -> &[String] {
        match self {
            CellContent::Empty => &[],
            CellContent::Shifts { lines, .. } => lines.as_slice(),
        }
    }

    pub fn style(&self) -> ShiftStyle {
        match self {
            CellContent::Empty => ShiftStyle::None,
            CellContent::Shifts { style, .. } => *style,
        }
    }

    /// Display text with the placeholder substituted for empty cells.
    pub fn display_text(&self) -> String {
        match self {
            CellContent::Empty => EMPTY_CELL_PLACEHOLDER.to_string(),
            CellContent::Shifts { lines, .. } => lines.join(LINE_SEPARATOR),
        }
    }
}

// ============================================================================
// GRID MODEL
// ============================================================================

/// The employee x date pivot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridModel {
    /// Unique work-date keys, lexicographically sorted (columns).
    pub date_axis: Vec<String>,
    /// Unique employee names, lexicographically sorted (rows).
    pub employee_axis: Vec<String>,
    /// `cells[row][col]`, one row per employee, one column per date.
    pub cells: Vec<Vec<CellContent>>,
}

impl GridModel {
    /// The "no data" grid.
    pub fn no_data() -> Self {
        GridModel::default()
    }

    pub fn is_no_data(&self) -> bool {
        self.employee_axis.is_empty() || self.date_axis.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.employee_axis.len()
    }

    pub fn col_count(&self) -> usize {
        self.date_axis.len()
    }

    /// Looks up a cell by axis values.
    pub fn cell(&self, employee: &str, date: &str) -> Option<&CellContent> {
        let row = self.employee_axis.iter().position(|e| e == employee)?;
        let col = self.date_axis.iter().position(|d| d == date)?;
        self.cell_at(row, col)
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Option<&CellContent> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// Iterates `(employee, date, cell)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (&str, &str, &CellContent)> {
        self.employee_axis.iter().zip(&self.cells).flat_map(move |(employee, row)| {
            self.date_axis
                .iter()
                .zip(row)
                .map(move |(date, cell)| (employee.as_str(), date.as_str(), cell))
        })
    }

    pub fn stats(&self) -> GridStats {
        let mut stats = GridStats {
            employees: self.row_count(),
            dates: self.col_count(),
            ..GridStats::default()
        };
        for (_, _, cell) in self.iter_cells() {
            match cell {
                CellContent::Empty => stats.empty_cells += 1,
                CellContent::Shifts { record_count, .. } => {
                    stats.filled_cells += 1;
                    stats.records += record_count;
                }
            }
        }
        stats
    }
}

/// Summary counts for logging and the status line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridStats {
    pub employees: usize,
    pub dates: usize,
    pub filled_cells: usize,
    pub empty_cells: usize,
    /// Records placed in filled cells.
    pub records: usize,
}
