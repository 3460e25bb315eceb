//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for roster app integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use app_lib::{create_app_state, AppState};
use chrono::{TimeZone, Utc};
use roster_engine::ScheduleRecord;
use roster_source::{FetchWindow, ScheduleSource, SourceError};

/// Test harness holding a fresh application state.
pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    pub fn new() -> Self {
        TestHarness {
            state: create_app_state(),
        }
    }

    /// A harness whose store already holds the week fixture.
    pub fn with_week_roster() -> Self {
        let harness = Self::new();
        harness.load(WeekFixture::records());
        harness
    }

    /// Loads records through the normal fetch path.
    pub fn load(&self, records: Vec<ScheduleRecord>) {
        let ticket = self.state.begin_fetch();
        self.state.complete_fetch(ticket, Ok(records));
    }
}

pub fn window() -> FetchWindow {
    FetchWindow::around(Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap(), 3)
}

/// A source that replays pre-scripted responses in order.
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<ScheduleRecord>, SourceError>>>,
    pub calls: Mutex<Vec<FetchWindow>>,
}

impl ScriptedSource {
    pub fn new(responses: Vec<Result<Vec<ScheduleRecord>, SourceError>>) -> Self {
        ScriptedSource {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ScheduleSource for ScriptedSource {
    fn describe(&self) -> String {
        "scripted".to_string()
    }

    async fn fetch(&self, window: &FetchWindow) -> Result<Vec<ScheduleRecord>, SourceError> {
        self.calls.lock().unwrap().push(*window);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(SourceError::Status { status: 503 }))
    }
}

/// Four employees over three days, including a double shift, a record
/// without position and one without employee name.
pub struct WeekFixture;

impl WeekFixture {
    pub fn records() -> Vec<ScheduleRecord> {
        vec![
            ScheduleRecord::new("An", "Sáng", "2024-01-01", "Lễ tân"),
            ScheduleRecord::new("An", "Chiều", "2024-01-01", "Lễ tân"),
            ScheduleRecord::new("Bình", "Tối", "2024-01-02", "Bếp"),
            ScheduleRecord::new("Chi", "sang", "2024-01-03", "Phục vụ"),
            ScheduleRecord::new("Dũng", "Chiều", "2024-01-02", ""),
            ScheduleRecord::new("", "Tối", "2024-01-03", "Bảo vệ"),
        ]
    }

    pub fn json() -> String {
        serde_json::to_string(&Self::records()).unwrap()
    }
}
