//! FILENAME: app/src/commands.rs
//! PURPOSE: Command functions driving the roster pipeline.
//! CONTEXT: Every filter change re-runs filter + grid build from scratch.

use roster_engine::{build_grid, FilterAxis, FilterCriteria, Selection};
use roster_source::{FetchWindow, ScheduleSource};

use crate::api_types::{FilterOptionsResponse, GridViewResponse, LoadResponse};
use crate::{log_debug, log_enter, log_exit, log_info, log_warn, AppState, FetchOutcome};

// ============================================================================
// LOADING
// ============================================================================

/// Fetches records for `window` and, if this is still the newest fetch,
/// replaces the store with them.
pub async fn load_schedule<S: ScheduleSource>(
    state: &AppState,
    source: &S,
    window: FetchWindow,
) -> Result<LoadResponse, String> {
    log_enter!("CMD", "load_schedule", "source={}", source.describe());

    if let Ok(mut last) = state.last_window.lock() {
        *last = Some(window);
    }

    let ticket = state.begin_fetch();
    let result = source.fetch(&window).await;

    match state.complete_fetch(ticket, result) {
        FetchOutcome::Applied { record_count } => {
            log_exit!("CMD", "load_schedule", "records={}", record_count);
            Ok(LoadResponse {
                ticket,
                record_count,
                source: source.describe(),
            })
        }
        FetchOutcome::Stale { latest, .. } => {
            Err(format!("Superseded by a newer load (ticket {})", latest))
        }
        FetchOutcome::Failed(message) => Err(message),
    }
}

/// Re-issues the last load with the same window.
pub async fn retry_load<S: ScheduleSource>(
    state: &AppState,
    source: &S,
) -> Result<LoadResponse, String> {
    let window = state
        .last_window
        .lock()
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "Nothing to retry: no load has been issued".to_string())?;
    log_info!("CMD", "retry_load");
    load_schedule(state, source, window).await
}

// ============================================================================
// FILTERING AND VIEW
// ============================================================================

/// Changes one filter axis, leaving the other two as they are, and returns
/// the rebuilt grid.
pub fn set_filter(state: &AppState, axis: FilterAxis, value: &str) -> Result<GridViewResponse, String> {
    log_info!("FILTER", "set_filter {}={}", axis, value);
    let criteria = {
        let mut criteria = state.criteria.lock().map_err(|e| e.to_string())?;
        criteria.set(axis, Selection::parse(value));
        criteria.clone()
    };
    refilter(state, &criteria)
}

/// Sets every axis back to "all".
pub fn reset_filters(state: &AppState) -> Result<GridViewResponse, String> {
    log_info!("FILTER", "reset_filters");
    let criteria = {
        let mut criteria = state.criteria.lock().map_err(|e| e.to_string())?;
        *criteria = FilterCriteria::all();
        criteria.clone()
    };
    refilter(state, &criteria)
}

fn refilter(state: &AppState, criteria: &FilterCriteria) -> Result<GridViewResponse, String> {
    let mut store = state.store.lock().map_err(|e| e.to_string())?;
    let matched = store.refilter(criteria).len();
    log_debug!("FILTER", "matched {} of {} records", matched, store.all().len());
    Ok(view_from_filtered(state, store.filtered(), criteria))
}

/// Builds the grid for the current filtered subset.
pub fn get_grid_view(state: &AppState) -> Result<GridViewResponse, String> {
    let criteria = state.criteria.lock().map_err(|e| e.to_string())?.clone();
    let store = state.store.lock().map_err(|e| e.to_string())?;
    Ok(view_from_filtered(state, store.filtered(), &criteria))
}

fn view_from_filtered(
    state: &AppState,
    filtered: &[roster_engine::ScheduleRecord],
    criteria: &FilterCriteria,
) -> GridViewResponse {
    let grid = build_grid(filtered);
    if grid.is_no_data() {
        log_info!("GRID", "no data for criteria {:?}", criteria);
    } else {
        let stats = grid.stats();
        log_debug!(
            "GRID",
            "built {}x{} filled={} empty={}",
            stats.employees,
            stats.dates,
            stats.filled_cells,
            stats.empty_cells
        );
        let dates = roster_engine::SortedSet::from_iter(grid.date_axis.iter().map(String::as_str));
        if !roster_engine::is_calendar_ordered(&dates) {
            log_warn!("GRID", "date columns are not in calendar order (non-ISO date keys)");
        }
    }
    GridViewResponse::from_grid(&grid, criteria, &state.formatter)
}

/// Drop-down contents: employees and shifts from the full set, dates from
/// the filtered subset.
pub fn get_filter_options(state: &AppState) -> Result<FilterOptionsResponse, String> {
    let store = state.store.lock().map_err(|e| e.to_string())?;
    let options = store.filter_options();
    log_debug!(
        "FILTER",
        "options employees={} shifts={} dates={}",
        options.employees.len(),
        options.shifts.len(),
        options.dates.len()
    );
    Ok(FilterOptionsResponse::from_options(&options, &state.formatter))
}
