//! FILENAME: app/src/api_types.rs
// PURPOSE: Presentation payloads returned by the command layer.
// CONTEXT: camelCase serialization so a web front end can consume `--json` output as-is.

use roster_engine::{
    CellContent, DateFormatter, FilterCriteria, FilterOptions, GridModel, GridStats, ShiftStyle,
};
use serde::{Deserialize, Serialize};

/// Header of the row-label column.
pub const EMPLOYEE_HEADER: &str = "Nhân viên";

pub const NO_DATA_MESSAGE: &str = "Không có dữ liệu lịch làm việc.";
pub const LOAD_FAILED_MESSAGE: &str = "Không thể tải dữ liệu lịch làm việc.";

/// One date column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHeader {
    /// Raw date key (also the date filter value).
    pub key: String,
    /// `"<weekday>\n<DD/MM>"`, or the raw key when unparsable.
    pub label: String,
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCellData {
    pub lines: Vec<String>,
    /// Display text, `-` for empty cells.
    pub display: String,
    pub style: ShiftStyle,
    pub css_class: String,
}

impl From<&CellContent> for GridCellData {
    fn from(cell: &CellContent) -> Self {
        GridCellData {
            lines: cell.lines().to_vec(),
            display: cell.display_text(),
            style: cell.style(),
            css_class: cell.style().css_class().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRowData {
    pub employee: String,
    pub cells: Vec<GridCellData>,
}

/// Everything the renderer needs for one grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridViewResponse {
    pub no_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub corner_label: String,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<GridRowData>,
    pub stats: GridStats,
    pub criteria: FilterCriteria,
}

impl GridViewResponse {
    pub fn from_grid(grid: &GridModel, criteria: &FilterCriteria, formatter: &DateFormatter) -> Self {
        let columns = grid
            .date_axis
            .iter()
            .map(|key| ColumnHeader {
                key: key.clone(),
                label: formatter.format_date_with_weekday(key),
            })
            .collect();

        let rows = grid
            .employee_axis
            .iter()
            .zip(&grid.cells)
            .map(|(employee, cells)| GridRowData {
                employee: employee.clone(),
                cells: cells.iter().map(GridCellData::from).collect(),
            })
            .collect();

        let no_data = grid.is_no_data();
        GridViewResponse {
            no_data,
            message: no_data.then(|| NO_DATA_MESSAGE.to_string()),
            corner_label: EMPLOYEE_HEADER.to_string(),
            columns,
            rows,
            stats: grid.stats(),
            criteria: criteria.clone(),
        }
    }
}

/// A drop-down entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionItem {
    pub value: String,
    pub label: String,
}

/// Drop-down contents for the three filter axes. Each list is preceded on
/// screen by the implicit "all" entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptionsResponse {
    pub employees: Vec<OptionItem>,
    pub shifts: Vec<OptionItem>,
    pub dates: Vec<OptionItem>,
}

impl FilterOptionsResponse {
    pub fn from_options(options: &FilterOptions, formatter: &DateFormatter) -> Self {
        let plain = |value: &str| OptionItem {
            value: value.to_string(),
            label: value.to_string(),
        };
        FilterOptionsResponse {
            employees: options.employees.iter().map(plain).collect(),
            shifts: options.shifts.iter().map(plain).collect(),
            dates: options
                .dates
                .iter()
                .map(|d| OptionItem {
                    value: d.to_string(),
                    label: formatter.format_date_with_weekday(d),
                })
                .collect(),
        }
    }
}

/// Result of a load command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResponse {
    pub ticket: u64,
    pub record_count: usize,
    pub source: String,
}
