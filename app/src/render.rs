//! FILENAME: app/src/render.rs
// PURPOSE: Plain-text presentation of a grid view (terminal output).
// FORMAT: Fixed-width columns separated by " | ", multi-line cells stacked.

use crate::api_types::{FilterOptionsResponse, GridViewResponse, LOAD_FAILED_MESSAGE};
use crate::LoadFailure;

const COLUMN_SEPARATOR: &str = " | ";

/// Renders the grid, or the no-data message.
pub fn render_text(view: &GridViewResponse) -> String {
    if view.no_data {
        return view.message.clone().unwrap_or_default() + "\n";
    }

    let mut header: Vec<Vec<String>> = vec![vec![view.corner_label.clone()]];
    header.extend(view.columns.iter().map(|c| split_lines(&c.label)));

    let body: Vec<Vec<Vec<String>>> = view
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![vec![row.employee.clone()]];
            cells.extend(row.cells.iter().map(|c| split_lines(&c.display)));
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            std::iter::once(&header)
                .chain(body.iter())
                .filter_map(|row| row.get(col))
                .flat_map(|lines| lines.iter().map(|l| display_width(l)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    out.push_str(&rule(&widths));
    out.push('\n');
    for row in &body {
        push_row(&mut out, row, &widths);
    }
    out
}

/// The load-failure message. Only failures worth reissuing get the retry hint.
pub fn render_error(failure: &LoadFailure) -> String {
    let mut out = format!("{} {}\n", LOAD_FAILED_MESSAGE, failure.message);
    if failure.retryable {
        out.push_str("Thử lại: chạy lại lệnh hoặc dùng --retries.\n");
    }
    out
}

/// The three drop-downs, each led by its "all" entry.
pub fn render_options(options: &FilterOptionsResponse) -> String {
    let mut out = String::new();
    let sections = [
        ("Nhân viên", "Tất cả nhân viên", &options.employees),
        ("Ca", "Tất cả ca", &options.shifts),
        ("Ngày", "Tất cả ngày", &options.dates),
    ];
    for (title, all_label, items) in sections {
        out.push_str(&format!("{}:\n  all = {}\n", title, all_label));
        for item in items.iter() {
            let label = item.label.replace('\n', " ");
            if label == item.value {
                out.push_str(&format!("  {}\n", item.value));
            } else {
                out.push_str(&format!("  {} = {}\n", item.value, label));
            }
        }
    }
    out
}

/// Cell text lines without the blank spacer lines between entries.
fn split_lines(text: &str) -> Vec<String> {
    let lines: Vec<String> = text
        .split('\n')
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(fill))
}

fn push_row(out: &mut String, row: &[Vec<String>], widths: &[usize]) {
    let height = row.iter().map(Vec::len).max().unwrap_or(1);
    for line in 0..height {
        let parts: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| pad(cell.get(line).map(String::as_str).unwrap_or(""), *width))
            .collect();
        out.push_str(parts.join(COLUMN_SEPARATOR).trim_end());
        out.push('\n');
    }
}

fn rule(widths: &[usize]) -> String {
    widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_types::GridViewResponse;
    use roster_engine::{build_grid, DateFormatter, FilterCriteria, ScheduleRecord};

    fn view(records: &[ScheduleRecord]) -> GridViewResponse {
        GridViewResponse::from_grid(&build_grid(records), &FilterCriteria::all(), &DateFormatter::default())
    }

    #[test]
    fn test_no_data_message() {
        assert_eq!(render_text(&view(&[])), "Không có dữ liệu lịch làm việc.\n");
    }

    #[test]
    fn test_table_layout() {
        let records = vec![
            ScheduleRecord::new("An", "Sáng", "2024-01-01", "Lễ tân"),
            ScheduleRecord::new("An", "Chiều", "2024-01-01", "Lễ tân"),
            ScheduleRecord::new("Bình", "Tối", "2024-01-02", "Bếp"),
        ];
        let text = render_text(&view(&records));
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Nhân viên | T2"));
        assert!(lines[1].contains("01/01"));
        assert!(lines[1].contains("02/01"));
        assert!(lines[2].starts_with("---------"));
        assert!(lines[3].starts_with("An"));
        assert!(lines[3].contains("Sáng : Lễ tân"));
        assert!(lines[4].contains("Chiều : Lễ tân"));
        assert!(text.contains("Tối : Bếp"));
        // Empty intersections show the placeholder.
        assert!(lines[3].trim_end().ends_with('-'));
    }

    #[test]
    fn test_error_message() {
        let text = render_error(&LoadFailure {
            message: "HTTP error! status: 500".to_string(),
            retryable: true,
        });
        assert!(text.starts_with("Không thể tải dữ liệu lịch làm việc. HTTP error! status: 500"));
        assert!(text.contains("--retries"));
    }

    #[test]
    fn test_shape_error_has_no_retry_hint() {
        let text = render_error(&LoadFailure {
            message: "Data is not in expected format (expected an array, got object)".to_string(),
            retryable: false,
        });
        assert_eq!(text.lines().count(), 1);
        assert!(!text.contains("--retries"));
    }
}
