use chrono::NaiveDateTime;
use entity::year_sync::SyncStatus;
use serde::Serialize;

use crate::model::db::YearSyncModel;

/// Result of a completed or partially completed season sync run.
#[derive(Clone, Debug)]
pub struct SyncOutcome {
    /// Season the sync ran for.
    pub year: i32,
    /// Final sync status written to the database.
    pub status: SyncStatus,
    /// Final status message, if one was recorded.
    pub message: Option<String>,
    /// Distinct drivers linked to the season after the run.
    pub drivers_count: i32,
    /// Sessions stored for the season after the run.
    pub sessions_count: i32,
    /// Whether rerunning the sync could succeed. Set when the run was cut
    /// short by a transient upstream or database failure; a rerun picks up
    /// the already-stored data and fills in the rest.
    pub can_retry: bool,
}

/// Reported sync state for a single season.
#[derive(Clone, Debug, Serialize)]
pub struct YearSyncStatusDto {
    /// Season year.
    pub year: i32,
    /// Lifecycle status as its wire string (`not_started`, `in_progress`, ...).
    pub status: String,
    /// Progress percentage from 0 to 100.
    pub progress: i32,
    /// Human-readable description of the current or final stage.
    pub message: Option<String>,
    /// When the season last completed a sync.
    pub last_synced: Option<NaiveDateTime>,
    /// Upper bound of the last incremental telemetry window, current season only.
    pub last_incremental_sync: Option<NaiveDateTime>,
    /// Driver count recorded at last completion.
    pub drivers_count: Option<i32>,
    /// Session count recorded at last completion.
    pub sessions_count: Option<i32>,
}

impl YearSyncStatusDto {
    /// Status reported for a season that has never been synced.
    pub fn not_started(year: i32) -> Self {
        Self {
            year,
            status: SyncStatus::NotStarted.to_string(),
            progress: 0,
            message: None,
            last_synced: None,
            last_incremental_sync: None,
            drivers_count: None,
            sessions_count: None,
        }
    }
}

impl From<YearSyncModel> for YearSyncStatusDto {
    fn from(model: YearSyncModel) -> Self {
        Self {
            year: model.year,
            status: model.status.to_string(),
            progress: model.progress,
            message: model.message,
            last_synced: model.last_synced,
            last_incremental_sync: model.last_incremental_sync,
            drivers_count: model.drivers_count,
            sessions_count: model.sessions_count,
        }
    }
}

/// Aggregate sync state across every tracked season.
#[derive(Clone, Debug, Serialize)]
pub struct SyncOverview {
    /// Per-season status, most recent season first.
    pub years: Vec<YearSyncStatusDto>,
    /// Total drivers stored across all seasons.
    pub total_drivers: u64,
    /// Total sessions stored across all seasons.
    pub total_sessions: u64,
}
