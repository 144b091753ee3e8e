use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use entity::year_sync::SyncStatus;
use openf1::model::{DriverRecord, LapRecord, PositionRecord, SessionRecord};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    data::{
        driver_session::DriverSessionRepository,
        session::SessionRepository,
        session_cache::{SessionKeyCacheEntry, SessionKeyCacheRepository},
        year_sync::YearSyncRepository,
    },
    error::{retry::ErrorRetryStrategy, sync::SyncError, Error},
    model::{db::SessionModel, sync::SyncOutcome},
    service::{reconcile::ReconcileService, stats::StatsService},
    util::time::{current_season_year, season_end_exclusive, season_start},
};

/// Earliest season the upstream API serves data for.
pub const MIN_SYNC_YEAR: i32 = 2018;

/// Default time after which an in-progress sync's lease is considered abandoned.
pub const DEFAULT_LEASE_TIMEOUT_MINS: i64 = 30;

/// Session rosters fetched concurrently per batch.
const ROSTER_BATCH_SIZE: usize = 10;

/// Orchestrates season syncs against the upstream API.
///
/// A sync run walks a fixed sequence: resolve the season's sessions (from the
/// session key cache for past seasons, from the source otherwise), fan out over
/// session rosters, reconcile drivers, sessions and participation links, pull
/// position and lap telemetry over the season window, then recompute the derived
/// statistics tables. Progress checkpoints are written to the season's sync row
/// between phases so observers can follow a run.
///
/// Concurrent runs are excluded per season by a lease on the sync row. Each phase
/// commits its own transaction; reconciliation is idempotent, so a rerun after an
/// interrupted sync picks up cleanly without duplicating rows.
pub struct SyncService<'a> {
    db: &'a DatabaseConnection,
    source_client: &'a openf1::Client,
    lease_timeout: Duration,
}

impl<'a> SyncService<'a> {
    /// Creates a new instance of [`SyncService`]
    pub fn new(db: &'a DatabaseConnection, source_client: &'a openf1::Client) -> Self {
        Self {
            db,
            source_client,
            lease_timeout: Duration::minutes(DEFAULT_LEASE_TIMEOUT_MINS),
        }
    }

    /// Overrides the lease timeout after which a stale sync may be taken over.
    pub fn with_lease_timeout(mut self, lease_timeout: Duration) -> Self {
        self.lease_timeout = lease_timeout;
        self
    }

    /// Runs a full sync for one season.
    ///
    /// The telemetry window covers the whole calendar year, clamped to the present
    /// for the season currently underway.
    ///
    /// # Errors
    /// - [`SyncError::InvalidYear`] when the year falls outside the syncable range
    /// - [`SyncError::SyncInProgress`] when another runner holds the season's lease
    pub async fn sync_year(&self, year: i32) -> Result<SyncOutcome, Error> {
        let current_year = current_season_year();
        if year < MIN_SYNC_YEAR || year > current_year {
            return Err(Error::SyncError(SyncError::InvalidYear {
                year,
                min: MIN_SYNC_YEAR,
                max: current_year,
            }));
        }

        let window_start = season_start(year)?;
        let window_end = season_end_exclusive(year)?.min(Utc::now());

        self.run(year, window_start, window_end, false).await
    }

    /// Runs a sync for the season currently underway.
    ///
    /// After a completed full sync has recorded an incremental high-water mark,
    /// subsequent runs only fetch telemetry newer than the mark and skip roster
    /// fetches for sessions already in the session key cache. Without a mark this
    /// falls back to a full season sync.
    pub async fn sync_current_year(&self) -> Result<SyncOutcome, Error> {
        let year = current_season_year();
        let state = YearSyncRepository::new(self.db).find_by_year(year).await?;

        match state.and_then(|state| state.last_incremental_sync) {
            Some(mark) => {
                let window_start = DateTime::from_naive_utc_and_offset(mark, Utc);
                let window_end = Utc::now();

                self.run(year, window_start, window_end, true).await
            }
            None => self.sync_year(year).await,
        }
    }

    /// Syncs every season from [`MIN_SYNC_YEAR`] through the current one.
    ///
    /// Seasons already marked completed are skipped. A season that fails does not
    /// stop the walk: its error outcome is recorded and the next season proceeds.
    pub async fn sync_all_years(&self) -> Result<Vec<SyncOutcome>, Error> {
        let year_sync_repo = YearSyncRepository::new(self.db);
        let current_year = current_season_year();
        let mut outcomes = Vec::new();

        for year in MIN_SYNC_YEAR..=current_year {
            let completed = year_sync_repo
                .find_by_year(year)
                .await?
                .is_some_and(|state| state.status == SyncStatus::Completed);
            if completed && year != current_year {
                tracing::info!("Season {} already synced, skipping", year);
                continue;
            }

            let outcome = if year == current_year {
                self.sync_current_year().await
            } else {
                self.sync_year(year).await
            };

            match outcome {
                Ok(outcome) => outcomes.push(outcome),
                Err(Error::SyncError(SyncError::SyncInProgress(_))) => {
                    tracing::info!("Season {} sync in progress elsewhere, skipping", year);
                }
                Err(error) => {
                    tracing::error!("Season {} sync failed: {}", year, error);
                    outcomes.push(SyncOutcome {
                        year,
                        status: SyncStatus::Error,
                        message: Some(error.to_string()),
                        drivers_count: 0,
                        sessions_count: 0,
                        can_retry: matches!(
                            error.to_retry_strategy(),
                            ErrorRetryStrategy::Retry
                        ),
                    });
                }
            }
        }

        Ok(outcomes)
    }

    /// Acquires the season lease, executes the sync, and records the terminal state.
    ///
    /// A retryable failure (rate limit exhaustion, transport or connection trouble)
    /// marks the season `incomplete`: data stored so far is kept and the run can be
    /// repeated. Any other failure marks it `error` and propagates.
    async fn run(
        &self,
        year: i32,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        incremental: bool,
    ) -> Result<SyncOutcome, Error> {
        let year_sync_repo = YearSyncRepository::new(self.db);

        year_sync_repo.get_or_create(year).await?;

        let now = Utc::now().naive_utc();
        let acquired = year_sync_repo
            .try_acquire_lease(year, &lease_owner(), now, now - self.lease_timeout)
            .await?;
        if !acquired {
            return Err(Error::SyncError(SyncError::SyncInProgress(year)));
        }

        tracing::info!(
            "Starting {} sync for season {}",
            if incremental { "incremental" } else { "full" },
            year
        );

        match self.execute(year, window_start, window_end, incremental).await {
            Ok(outcome) => {
                tracing::info!(
                    "Season {} sync completed with {} drivers and {} sessions",
                    year,
                    outcome.drivers_count,
                    outcome.sessions_count
                );

                Ok(outcome)
            }
            Err(error) => match error.to_retry_strategy() {
                ErrorRetryStrategy::Retry => {
                    let message = format!(
                        "Sync incomplete, stored data is partial and the run can be retried: {error}"
                    );
                    tracing::warn!("Season {} sync incomplete: {}", year, error);
                    year_sync_repo.mark_incomplete(year, &message).await?;

                    Ok(SyncOutcome {
                        year,
                        status: SyncStatus::Incomplete,
                        message: Some(message),
                        drivers_count: 0,
                        sessions_count: 0,
                        can_retry: true,
                    })
                }
                ErrorRetryStrategy::Fail => {
                    tracing::error!("Season {} sync failed: {}", year, error);
                    year_sync_repo.mark_error(year, &error.to_string()).await?;

                    Err(error)
                }
            },
        }
    }

    /// Executes the sync phases for a leased season.
    ///
    /// Progress checkpoints are written on the base connection strictly between
    /// phase transactions, never while one is open, so they stay visible mid-run
    /// and survive a rolled-back phase.
    async fn execute(
        &self,
        year: i32,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        incremental: bool,
    ) -> Result<SyncOutcome, Error> {
        let year_sync_repo = YearSyncRepository::new(self.db);

        year_sync_repo
            .update_progress(year, 5, "Initializing sync process...")
            .await?;

        // Past seasons' calendars no longer change, so a warm session key cache
        // answers the session list without a source round trip. The current
        // season always refetches; its calendar is still growing.
        let mut cached_sessions: Vec<SessionModel> = Vec::new();
        if year != current_season_year() {
            let cached_keys = SessionKeyCacheRepository::new(self.db)
                .get_session_keys(year)
                .await?;
            if !cached_keys.is_empty() {
                cached_sessions = SessionRepository::new(self.db).find_by_year(year).await?;
            }
        }
        let sessions_cached = !cached_sessions.is_empty();

        let session_records: Vec<SessionRecord> = if sessions_cached {
            tracing::info!(
                "Season {}: serving {} sessions from cache",
                year,
                cached_sessions.len()
            );
            Vec::new()
        } else {
            year_sync_repo
                .update_progress(year, 10, "Fetching sessions from API...")
                .await?;

            let records = self
                .source_client
                .fetch("sessions", &[("year".to_string(), year.to_string())])
                .await?;
            if records.is_empty() {
                return Err(Error::SyncError(SyncError::NoSessionsFound(year)));
            }
            records
        };

        // Session keys already processed by an earlier run of this season; their
        // rosters are not fetched again on incremental syncs.
        let skip_keys: HashSet<i32> = if incremental {
            SessionKeyCacheRepository::new(self.db)
                .get_session_keys(year)
                .await?
                .into_iter()
                .collect()
        } else {
            HashSet::new()
        };

        let candidate_keys: Vec<i32> = if sessions_cached {
            cached_sessions.iter().map(|session| session.session_key).collect()
        } else {
            session_records
                .iter()
                .filter_map(|record| record.session_key)
                .collect()
        };

        let mut roster_keys: Vec<i32> = Vec::new();
        let mut seen_keys: HashSet<i32> = HashSet::new();
        for session_key in candidate_keys {
            if !skip_keys.contains(&session_key) && seen_keys.insert(session_key) {
                roster_keys.push(session_key);
            }
        }

        year_sync_repo
            .update_progress(year, 20, "Fetching drivers for each session...")
            .await?;

        let roster_records = self.fetch_rosters(&roster_keys).await?;
        if !incremental && roster_records.is_empty() {
            return Err(Error::SyncError(SyncError::NoDriversFound(year)));
        }

        let roster_pairs: Vec<(i32, i32)> = roster_records
            .iter()
            .filter_map(|record| Some((record.driver_number?, record.session_key?)))
            .collect();

        year_sync_repo
            .update_progress(year, 40, "Processing drivers...")
            .await?;

        let txn = self.db.begin().await?;
        let mut driver_ids = ReconcileService::new(&txn)
            .reconcile_drivers(roster_records)
            .await?;
        txn.commit().await?;

        year_sync_repo
            .update_progress(year, 60, "Processing sessions...")
            .await?;

        let season_rows = if sessions_cached {
            cached_sessions
        } else {
            let txn = self.db.begin().await?;
            let reconciled = ReconcileService::new(&txn)
                .reconcile_sessions(year, session_records)
                .await?;
            let cache_entries: Vec<SessionKeyCacheEntry> = reconciled
                .iter()
                .map(|session| SessionKeyCacheEntry {
                    session_key: session.session_key,
                    session_name: Some(session.session_name.clone()),
                    session_type: Some(session.session_type.clone()),
                    date_start: Some(session.date_start),
                    location: session.location.clone(),
                })
                .collect();
            SessionKeyCacheRepository::new(&txn)
                .replace_year(year, cache_entries)
                .await?;
            txn.commit().await?;

            reconciled
        };

        let mut session_ids: HashMap<i32, i32> = season_rows
            .iter()
            .map(|session| (session.session_key, session.id))
            .collect();

        year_sync_repo
            .update_progress(year, 65, "Linking drivers to sessions...")
            .await?;

        let txn = self.db.begin().await?;
        let mut links = ReconcileService::new(&txn)
            .ensure_links(&roster_pairs, &driver_ids, &session_ids)
            .await?;
        txn.commit().await?;

        year_sync_repo
            .update_progress(year, 70, "Processing positions and laps...")
            .await?;

        let (positions, laps) = tokio::join!(
            openf1::chunk::fetch_range_by_month::<PositionRecord>(
                self.source_client,
                "position",
                "date",
                window_start,
                window_end,
            ),
            openf1::chunk::fetch_range_by_month::<LapRecord>(
                self.source_client,
                "laps",
                "date_start",
                window_start,
                window_end,
            ),
        );
        let positions = positions?;
        let laps = laps?;

        // Telemetry can reference participations the rosters never mentioned, for
        // example a driver substituted in after rosters were cached. Links for
        // those pairs are created lazily before attaching samples.
        let telemetry_pairs: HashSet<(i32, i32)> = positions
            .iter()
            .filter_map(|record| Some((record.driver_number?, record.session_key?)))
            .chain(
                laps.iter()
                    .filter_map(|record| Some((record.driver_number?, record.session_key?))),
            )
            .collect();

        year_sync_repo
            .update_progress(
                year,
                80,
                &format!("Processing {} position records...", positions.len()),
            )
            .await?;

        let txn = self.db.begin().await?;
        let reconcile = ReconcileService::new(&txn);
        reconcile
            .resolve_missing_ids(&telemetry_pairs, &mut driver_ids, &mut session_ids)
            .await?;
        let lazy_pairs: Vec<(i32, i32)> = telemetry_pairs.into_iter().collect();
        links.extend(
            reconcile
                .ensure_links(&lazy_pairs, &driver_ids, &session_ids)
                .await?,
        );
        let stored_positions = reconcile.reconcile_positions(&positions, &links).await?;
        let link_ids: Vec<i32> = links.values().copied().collect();
        reconcile.infer_final_positions(&link_ids).await?;
        txn.commit().await?;

        tracing::info!(
            "Season {}: stored {} of {} position samples",
            year,
            stored_positions,
            positions.len()
        );

        year_sync_repo
            .update_progress(
                year,
                90,
                &format!("Processing {} lap records...", laps.len()),
            )
            .await?;

        let txn = self.db.begin().await?;
        let stored_laps = ReconcileService::new(&txn)
            .reconcile_laps(&laps, &links)
            .await?;
        txn.commit().await?;

        tracing::info!(
            "Season {}: stored {} of {} lap records",
            year,
            stored_laps,
            laps.len()
        );

        year_sync_repo
            .update_progress(year, 95, "Calculating statistics...")
            .await?;

        let txn = self.db.begin().await?;
        StatsService::new(&txn).refresh_year(year).await?;
        txn.commit().await?;

        let season_sessions = SessionRepository::new(self.db).find_by_year(year).await?;
        let season_session_ids: Vec<i32> =
            season_sessions.iter().map(|session| session.id).collect();
        let sessions_count = season_sessions.len() as i32;
        let drivers_count = DriverSessionRepository::new(self.db)
            .get_distinct_driver_ids(&season_session_ids)
            .await?
            .len() as i32;

        // The incremental high-water mark is the window's upper bound: anything
        // newer was not fetched and belongs to the next run.
        let incremental_mark =
            (year == current_season_year()).then(|| window_end.naive_utc());
        year_sync_repo
            .mark_completed(year, drivers_count, sessions_count, incremental_mark)
            .await?;

        Ok(SyncOutcome {
            year,
            status: SyncStatus::Completed,
            message: Some("Sync completed successfully".to_string()),
            drivers_count,
            sessions_count,
            can_retry: false,
        })
    }

    /// Fetches driver rosters for the given sessions, a batch at a time.
    ///
    /// Rosters within a batch are fetched concurrently; batches run sequentially
    /// to bound the request burst against the rate limiter.
    async fn fetch_rosters(&self, session_keys: &[i32]) -> Result<Vec<DriverRecord>, Error> {
        let mut rosters: Vec<DriverRecord> = Vec::new();

        for batch in session_keys.chunks(ROSTER_BATCH_SIZE) {
            let fetches = batch.iter().map(|session_key| {
                let params = vec![("session_key".to_string(), session_key.to_string())];
                async move {
                    self.source_client
                        .fetch::<DriverRecord>("drivers", &params)
                        .await
                }
            });

            for result in futures::future::join_all(fetches).await {
                rosters.extend(result?);
            }
        }

        Ok(rosters)
    }
}

/// Lease owner identifier for sync rows acquired by this process.
fn lease_owner() -> String {
    format!("pitwall-{}", std::process::id())
}
