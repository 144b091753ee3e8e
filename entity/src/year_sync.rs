use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;

/// Lifecycle of a year's sync.
///
/// `Incomplete` means session and driver data landed but telemetry fetching
/// failed; re-running the sync is safe and expected.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, DeriveDisplay)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum SyncStatus {
    #[sea_orm(string_value = "not_started", display_value = "not_started")]
    NotStarted,
    #[sea_orm(string_value = "in_progress", display_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed", display_value = "completed")]
    Completed,
    #[sea_orm(string_value = "error", display_value = "error")]
    Error,
    #[sea_orm(string_value = "incomplete", display_value = "incomplete")]
    Incomplete,
}

/// Per-year sync state machine row, unique by year.
///
/// The `lease_owner` / `lease_acquired_at` pair doubles as an advisory lock:
/// a sync may only start by atomically moving the row to `in_progress`, and a
/// stale lease (holder crashed mid-run) can be taken over after a timeout.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "year_sync")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub year: i32,
    pub status: SyncStatus,
    pub progress: i32,
    pub message: Option<String>,
    pub last_synced: Option<DateTime>,
    pub last_incremental_sync: Option<DateTime>,
    pub drivers_count: Option<i32>,
    pub sessions_count: Option<i32>,
    pub lease_owner: Option<String>,
    pub lease_acquired_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
