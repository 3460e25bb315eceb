//! FILENAME: core/roster-engine/src/date_format.rs
//! Date labels for column headers and the date drop-down.
//!
//! Output is fixed to the vi-VN convention: `DD/MM` with a weekday
//! abbreviation from a Sunday-first table. The year is deliberately not
//! shown. Input that is empty stays empty; input that cannot be read as a
//! calendar date is returned unchanged.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};

/// Weekday abbreviations indexed by days-from-Sunday.
pub const WEEKDAY_LABELS: [&str; 7] = ["CN", "T2", "T3", "T4", "T5", "T6", "T7"];

/// Display offset for timestamps that carry their own offset (UTC+07:00).
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 7 * 60;

const DATE_ONLY_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Formats raw date strings in one fixed display offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormatter {
    offset: FixedOffset,
}

impl Default for DateFormatter {
    fn default() -> Self {
        DateFormatter::with_offset_minutes(DEFAULT_UTC_OFFSET_MINUTES)
    }
}

impl DateFormatter {
    /// Out-of-range offsets fall back to the default.
    pub fn with_offset_minutes(minutes: i32) -> Self {
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                FixedOffset::east_opt(DEFAULT_UTC_OFFSET_MINUTES * 60)
                    .expect("default offset is within a day")
            });
        DateFormatter { offset }
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    /// Reads the calendar date of a raw value, or `None` if it is not one.
    pub fn parse(&self, raw: &str) -> Option<NaiveDate> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
            return Some(ts.with_timezone(&self.offset).date_naive());
        }
        for fmt in DATE_ONLY_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
                return Some(date);
            }
        }
        for fmt in NAIVE_DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                return Some(dt.date());
            }
        }
        None
    }

    /// `DD/MM`, or the raw input when unparsable.
    pub fn format_date(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }
        match self.parse(raw) {
            Some(date) => day_month(date),
            None => raw.to_string(),
        }
    }

    /// `"<weekday>\n<DD/MM>"`, or the raw input when unparsable.
    pub fn format_date_with_weekday(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }
        match self.parse(raw) {
            Some(date) => format!("{}\n{}", weekday_label(date), day_month(date)),
            None => raw.to_string(),
        }
    }
}

pub fn weekday_label(date: NaiveDate) -> &'static str {
    WEEKDAY_LABELS[date.weekday().num_days_from_sunday() as usize]
}

fn day_month(date: NaiveDate) -> String {
    format!("{:02}/{:02}", date.day(), date.month())
}

/// Shorthand for the default formatter.
pub fn format_date_with_weekday(raw: &str) -> String {
    DateFormatter::default().format_date_with_weekday(raw)
}
