//! FILENAME: app/src/lib.rs
// PURPOSE: Application state and module wiring for the roster viewer.
// CONTEXT: The transformation core is pure; this layer owns the fetch -> replace -> recompute lifecycle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use roster_engine::{DateFormatter, FilterCriteria, RecordStore, ScheduleRecord};
use roster_source::{FetchWindow, SourceError};

pub mod api_types;
pub mod commands;
pub mod config;
pub mod logging;
pub mod render;

pub use api_types::{
    ColumnHeader, FilterOptionsResponse, GridCellData, GridRowData, GridViewResponse,
    LoadResponse, OptionItem,
};
pub use commands::{
    get_filter_options, get_grid_view, load_schedule, reset_filters, retry_load, set_filter,
};
pub use config::{ConfigError, RosterConfig};
pub use logging::{init_log_file, install_log_bridge, next_seq, write_log};

/// Result of handing a finished fetch back to the state.
#[derive(Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The records replaced the store.
    Applied { record_count: usize },
    /// A newer fetch was issued meanwhile; the result was dropped.
    Stale { ticket: u64, latest: u64 },
    /// The fetch failed; the store is unchanged.
    Failed(String),
}

/// The most recent load error, kept for the retry prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub message: String,
    /// Whether reissuing the same window could succeed.
    pub retryable: bool,
}

pub struct AppState {
    /// Full record set and the filtered subset
    pub store: Mutex<RecordStore>,
    /// Current filter selection
    pub criteria: Mutex<FilterCriteria>,
    /// Last issued fetch ticket
    fetch_seq: AtomicU64,
    /// Window of the last fetch, reused by retry
    pub last_window: Mutex<Option<FetchWindow>>,
    last_error: Mutex<Option<LoadFailure>>,
    pub formatter: DateFormatter,
}

pub fn create_app_state() -> AppState {
    create_app_state_with(DateFormatter::default())
}

pub fn create_app_state_with(formatter: DateFormatter) -> AppState {
    log_info!("SYS", "Creating AppState offset_minutes={}", formatter.offset_minutes());
    AppState {
        store: Mutex::new(RecordStore::new()),
        criteria: Mutex::new(FilterCriteria::all()),
        fetch_seq: AtomicU64::new(0),
        last_window: Mutex::new(None),
        last_error: Mutex::new(None),
        formatter,
    }
}

impl AppState {
    /// Issues a new fetch ticket. Only the most recent ticket may apply.
    pub fn begin_fetch(&self) -> u64 {
        self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn latest_ticket(&self) -> u64 {
        self.fetch_seq.load(Ordering::SeqCst)
    }

    /// Error of the last load, cleared by the next successful one.
    pub fn last_error(&self) -> Option<LoadFailure> {
        self.last_error.lock().ok().and_then(|guard| guard.clone())
    }

    /// Applies a fetch result if `ticket` is still the latest. A successful
    /// load replaces the full set and resets every filter axis to "all".
    ///
    /// The ticket is compared while the store lock is held, so a result can
    /// never land after a newer one has been applied.
    pub fn complete_fetch(
        &self,
        ticket: u64,
        result: Result<Vec<ScheduleRecord>, SourceError>,
    ) -> FetchOutcome {
        let Ok(mut store) = self.store.lock() else {
            return FetchOutcome::Failed("state lock poisoned".to_string());
        };

        let latest = self.latest_ticket();
        if ticket != latest {
            log_warn!("FETCH", "dropping stale result ticket={} latest={}", ticket, latest);
            return FetchOutcome::Stale { ticket, latest };
        }

        match result {
            Ok(records) => {
                let record_count = records.len();
                let Ok(mut criteria) = self.criteria.lock() else {
                    return FetchOutcome::Failed("state lock poisoned".to_string());
                };
                store.replace(records);
                *criteria = FilterCriteria::all();
                self.set_last_error(None);
                log_info!("FETCH", "applied ticket={} records={}", ticket, record_count);
                FetchOutcome::Applied { record_count }
            }
            Err(e) => {
                let message = e.to_string();
                log_error!("FETCH", "ticket={} failed: {}", ticket, message);
                self.set_last_error(Some(LoadFailure {
                    message: message.clone(),
                    retryable: e.is_retryable(),
                }));
                FetchOutcome::Failed(message)
            }
        }
    }

    fn set_last_error(&self, failure: Option<LoadFailure>) {
        if let Ok(mut err) = self.last_error.lock() {
            *err = failure;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn rec(employee: &str) -> ScheduleRecord {
        ScheduleRecord::new(employee, "Sáng", "2024-01-01", "Bếp")
    }

    fn employees(state: &AppState) -> Vec<String> {
        let store = state.store.lock().unwrap();
        store.all().iter().map(|r| r.employee_name.clone()).collect()
    }

    #[test]
    fn test_ticket_checked_under_store_lock() {
        let state = Arc::new(create_app_state());
        let older = state.begin_fetch();

        // Hold the store while the older result is handed back, then issue a
        // newer ticket before releasing it.
        let guard = state.store.lock().unwrap();
        let pending = {
            let state = Arc::clone(&state);
            thread::spawn(move || state.complete_fetch(older, Ok(vec![rec("Cũ")])))
        };
        let newer = state.begin_fetch();
        drop(guard);

        let outcome = pending.join().unwrap();
        assert_eq!(outcome, FetchOutcome::Stale { ticket: older, latest: newer });
        assert!(employees(&state).is_empty());

        let applied = state.complete_fetch(newer, Ok(vec![rec("Mới")]));
        assert_eq!(applied, FetchOutcome::Applied { record_count: 1 });
        assert_eq!(employees(&state), vec!["Mới"]);
    }

    #[test]
    fn test_failure_records_retryability() {
        let state = create_app_state();

        let ticket = state.begin_fetch();
        state.complete_fetch(ticket, Err(SourceError::Status { status: 503 }));
        let failure = state.last_error().unwrap();
        assert_eq!(failure.message, "HTTP error! status: 503");
        assert!(failure.retryable);

        let ticket = state.begin_fetch();
        state.complete_fetch(ticket, Err(SourceError::NotAnArray { found: "object" }));
        assert!(!state.last_error().unwrap().retryable);

        let ticket = state.begin_fetch();
        state.complete_fetch(ticket, Ok(vec![rec("An")]));
        assert!(state.last_error().is_none());
    }
}
