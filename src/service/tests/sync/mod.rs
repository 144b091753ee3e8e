mod sync_all_years;

use chrono::{Duration, Utc};
use entity::year_sync::SyncStatus;
use mockito::Matcher;
use pitwall_test_utils::fixtures::f1::factory;
use sea_orm::EntityTrait;

use super::*;
use crate::data::session_cache::{SessionKeyCacheEntry, SessionKeyCacheRepository};
use crate::data::year_sync::YearSyncRepository;
use crate::error::{sync::SyncError, Error};
use crate::service::stats::StatsService;
use crate::service::sync::{SyncService, MIN_SYNC_YEAR};
use crate::util::time::current_season_year;

/// Cache entry for a session key, as an earlier completed run leaves it.
fn cached_entry(session_key: i32) -> SessionKeyCacheEntry {
    SessionKeyCacheEntry {
        session_key,
        session_name: Some("Race".to_string()),
        session_type: Some("Race".to_string()),
        date_start: None,
        location: None,
    }
}

/// Empty telemetry endpoint answering however many month windows the current
/// date produces.
fn empty_telemetry_endpoint(server: &mut mockito::ServerGuard, path: &str) -> mockito::Mock {
    server
        .mock("GET", path)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .expect_at_least(1)
        .create()
}
