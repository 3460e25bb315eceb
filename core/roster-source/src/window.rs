//! FILENAME: core/roster-source/src/window.rs
//! The date-range request sent to the data source.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Default half-width of the window around "today", in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 3;

/// `{startDate, endDate}`; both ends are sent as millisecond UTC timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl FetchWindow {
    /// Ends are swapped if given in reverse.
    pub fn new(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        if start_date <= end_date {
            FetchWindow { start_date, end_date }
        } else {
            FetchWindow { start_date: end_date, end_date: start_date }
        }
    }

    /// `now - days` .. `now + days`, saturating at the representable range.
    pub fn around(now: DateTime<Utc>, days: u32) -> Self {
        let span = Duration::days(i64::from(days));
        FetchWindow::new(
            now.checked_sub_signed(span).unwrap_or(DateTime::<Utc>::MIN_UTC),
            now.checked_add_signed(span).unwrap_or(DateTime::<Utc>::MAX_UTC),
        )
    }
}

impl Serialize for FetchWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FetchWindow", 2)?;
        state.serialize_field("startDate", &iso_millis(&self.start_date))?;
        state.serialize_field("endDate", &iso_millis(&self.end_date))?;
        state.end()
    }
}

fn iso_millis(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
