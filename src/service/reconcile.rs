use std::collections::{HashMap, HashSet};

use openf1::model::{DriverRecord, LapRecord, PositionRecord, SessionRecord};
use sea_orm::ConnectionTrait;

use crate::{
    data::{
        driver::DriverRepository,
        driver_session::DriverSessionRepository,
        lap::{LapInsert, LapRepository},
        position::PositionRepository,
        session::{SessionRepository, SessionUpsert},
    },
    error::Error,
    model::db::SessionModel,
    util::time::{format_lap_time, parse_wire_timestamp},
};

/// Reconciles wire records into relational rows.
///
/// Every method is idempotent: replaying the same payload changes nothing. Records
/// missing their natural key or a required field are skipped individually rather
/// than failing the batch, since the upstream API omits fields freely.
pub struct ReconcileService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReconcileService<'a, C> {
    /// Creates a new instance of [`ReconcileService`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Upserts drivers by car number and returns a `driver_number -> id` map.
    ///
    /// When the same car number appears in multiple sessions' rosters, the last
    /// record wins, so profile fields reflect the most recent appearance.
    pub async fn reconcile_drivers(
        &self,
        records: Vec<DriverRecord>,
    ) -> Result<HashMap<i32, i32>, Error> {
        let driver_repo = DriverRepository::new(self.db);

        let mut by_number: HashMap<i32, DriverRecord> = HashMap::new();
        for record in records {
            let Some(driver_number) = record.driver_number else {
                tracing::debug!("Skipping driver record without a driver number");
                continue;
            };

            by_number.insert(driver_number, record);
        }

        let drivers = driver_repo.upsert_many(by_number.into_iter().collect()).await?;

        Ok(drivers
            .into_iter()
            .map(|driver| (driver.driver_number, driver.id))
            .collect())
    }

    /// Upserts sessions by session key and returns the stored models.
    ///
    /// Records without a session key or a parseable start time are skipped; a
    /// session cannot be windowed or aggregated without them. Missing names fall
    /// back to `Unknown` and a missing year falls back to the requested season.
    pub async fn reconcile_sessions(
        &self,
        year: i32,
        records: Vec<SessionRecord>,
    ) -> Result<Vec<SessionModel>, Error> {
        let session_repo = SessionRepository::new(self.db);

        let mut by_key: HashMap<i32, SessionUpsert> = HashMap::new();
        for record in records {
            let Some(session_key) = record.session_key else {
                tracing::debug!("Skipping session record without a session key");
                continue;
            };

            let date_start = match record.date_start.as_deref().map(parse_wire_timestamp) {
                Some(Ok(date_start)) => date_start,
                Some(Err(_)) | None => {
                    tracing::warn!(
                        "Skipping session {} with missing or unparseable start time",
                        session_key
                    );
                    continue;
                }
            };
            let date_end = record
                .date_end
                .as_deref()
                .and_then(|raw| parse_wire_timestamp(raw).ok());

            by_key.insert(
                session_key,
                SessionUpsert {
                    session_key,
                    session_name: record.session_name.unwrap_or_else(|| "Unknown".to_string()),
                    session_type: record.session_type.unwrap_or_else(|| "Unknown".to_string()),
                    date_start,
                    date_end,
                    gmt_offset: record.gmt_offset,
                    meeting_key: record.meeting_key,
                    location: record.location,
                    country_name: record.country_name,
                    circuit_short_name: record.circuit_short_name,
                    year: record.year.unwrap_or(year),
                },
            );
        }

        let sessions = session_repo
            .upsert_many(by_key.into_values().collect())
            .await?;

        Ok(sessions)
    }

    /// Ensures a participation link exists for each `(driver_number, session_key)`
    /// pair and returns a map from pair to link id.
    ///
    /// Pairs whose driver or session is not present in the provided id maps are
    /// skipped; telemetry for them cannot be attached to anything.
    pub async fn ensure_links(
        &self,
        pairs: &[(i32, i32)],
        driver_ids: &HashMap<i32, i32>,
        session_ids: &HashMap<i32, i32>,
    ) -> Result<HashMap<(i32, i32), i32>, Error> {
        let driver_session_repo = DriverSessionRepository::new(self.db);

        let all_session_ids: Vec<i32> = session_ids.values().copied().collect();
        let mut by_ids: HashMap<(i32, i32), i32> = driver_session_repo
            .find_links(&all_session_ids)
            .await?
            .into_iter()
            .map(|(id, driver_id, session_id)| ((driver_id, session_id), id))
            .collect();

        let mut to_insert: Vec<(i32, i32)> = Vec::new();
        let mut queued: HashSet<(i32, i32)> = HashSet::new();

        for (driver_number, session_key) in pairs {
            let (Some(driver_id), Some(session_id)) =
                (driver_ids.get(driver_number), session_ids.get(session_key))
            else {
                tracing::debug!(
                    "Skipping participation link for unknown driver {} or session {}",
                    driver_number,
                    session_key
                );
                continue;
            };

            let key = (*driver_id, *session_id);
            if !by_ids.contains_key(&key) && queued.insert(key) {
                to_insert.push(key);
            }
        }

        let created = driver_session_repo.insert_many(to_insert).await?;
        for link in created {
            by_ids.insert((link.driver_id, link.session_id), link.id);
        }

        let mut links: HashMap<(i32, i32), i32> = HashMap::new();
        for (driver_number, session_key) in pairs {
            let (Some(driver_id), Some(session_id)) =
                (driver_ids.get(driver_number), session_ids.get(session_key))
            else {
                continue;
            };

            if let Some(link_id) = by_ids.get(&(*driver_id, *session_id)) {
                links.insert((*driver_number, *session_key), *link_id);
            }
        }

        Ok(links)
    }

    /// Resolves drivers and sessions referenced by telemetry but absent from the
    /// in-memory id maps, extending the maps from the database.
    ///
    /// Telemetry can reference a driver whose roster entry was fetched by an
    /// earlier sync, or a session pulled fresh by key; both are looked up in one
    /// batch per table.
    pub async fn resolve_missing_ids(
        &self,
        pairs: &HashSet<(i32, i32)>,
        driver_ids: &mut HashMap<i32, i32>,
        session_ids: &mut HashMap<i32, i32>,
    ) -> Result<(), Error> {
        let unknown_drivers: Vec<i32> = pairs
            .iter()
            .map(|(driver_number, _)| *driver_number)
            .filter(|driver_number| !driver_ids.contains_key(driver_number))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let unknown_sessions: Vec<i32> = pairs
            .iter()
            .map(|(_, session_key)| *session_key)
            .filter(|session_key| !session_ids.contains_key(session_key))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        if !unknown_drivers.is_empty() {
            let found = DriverRepository::new(self.db)
                .get_ids_by_driver_numbers(&unknown_drivers)
                .await?;
            driver_ids.extend(found.into_iter().map(|(id, driver_number)| (driver_number, id)));
        }

        if !unknown_sessions.is_empty() {
            let found = SessionRepository::new(self.db)
                .get_ids_by_session_keys(&unknown_sessions)
                .await?;
            session_ids.extend(found.into_iter().map(|(id, session_key)| (session_key, id)));
        }

        Ok(())
    }

    /// Stores new position samples, returning the number of rows inserted.
    ///
    /// A sample is identified by `(link, timestamp, position)`; duplicates within
    /// the batch and rows already stored are skipped, so overlapping fetch windows
    /// replay cleanly.
    pub async fn reconcile_positions(
        &self,
        records: &[PositionRecord],
        links: &HashMap<(i32, i32), i32>,
    ) -> Result<u64, Error> {
        let position_repo = PositionRepository::new(self.db);

        let link_ids: Vec<i32> = links.values().copied().collect();
        let existing: HashSet<(i32, chrono::NaiveDateTime, i32)> = position_repo
            .find_keys_by_driver_session_ids(&link_ids)
            .await?
            .into_iter()
            .collect();

        let mut seen: HashSet<(i32, chrono::NaiveDateTime, i32)> = HashSet::new();
        let mut to_insert: Vec<(i32, chrono::NaiveDateTime, i32)> = Vec::new();

        for record in records {
            let (Some(driver_number), Some(session_key), Some(raw_date), Some(position)) = (
                record.driver_number,
                record.session_key,
                record.date.as_deref(),
                record.position,
            ) else {
                tracing::debug!("Skipping position record with missing fields");
                continue;
            };

            let Some(link_id) = links.get(&(driver_number, session_key)) else {
                tracing::debug!(
                    "Skipping position for driver {} in session {} without a participation link",
                    driver_number,
                    session_key
                );
                continue;
            };

            let date = match parse_wire_timestamp(raw_date) {
                Ok(date) => date,
                Err(_) => {
                    tracing::warn!("Skipping position with unparseable timestamp {:?}", raw_date);
                    continue;
                }
            };

            let key = (*link_id, date, position);
            if existing.contains(&key) || !seen.insert(key) {
                continue;
            }

            to_insert.push(key);
        }

        let inserted = position_repo.insert_many(to_insert).await?;

        Ok(inserted)
    }

    /// Derives final race positions from the latest position sample per
    /// participation and stores them where none is recorded yet.
    ///
    /// Ties on the latest timestamp resolve to the better (lower) position.
    /// Participations that already carry a final position are never overwritten.
    pub async fn infer_final_positions(&self, driver_session_ids: &[i32]) -> Result<u64, Error> {
        let inferred = self.derive_final_positions(driver_session_ids).await?;
        let updated = DriverSessionRepository::new(self.db)
            .set_final_positions(inferred)
            .await?;

        Ok(updated)
    }

    /// Recomputes final positions from the stored samples, replacing whatever
    /// each participation carries today.
    ///
    /// The routine sync path only fills gaps; this is the repair path for rows
    /// that were inferred from an earlier, partial set of samples.
    pub async fn recompute_final_positions(
        &self,
        driver_session_ids: &[i32],
    ) -> Result<u64, Error> {
        let derived = self.derive_final_positions(driver_session_ids).await?;
        let updated = DriverSessionRepository::new(self.db)
            .overwrite_final_positions(derived)
            .await?;

        Ok(updated)
    }

    /// Folds position samples down to the latest one per participation.
    async fn derive_final_positions(
        &self,
        driver_session_ids: &[i32],
    ) -> Result<Vec<(i32, i32)>, Error> {
        let samples = PositionRepository::new(self.db)
            .find_keys_by_driver_session_ids(driver_session_ids)
            .await?;

        let mut latest: HashMap<i32, (chrono::NaiveDateTime, i32)> = HashMap::new();
        for (link_id, date, position) in samples {
            match latest.get(&link_id) {
                Some((last_date, last_position))
                    if date < *last_date || (date == *last_date && position >= *last_position) => {}
                _ => {
                    latest.insert(link_id, (date, position));
                }
            }
        }

        Ok(latest
            .into_iter()
            .map(|(link_id, (_, position))| (link_id, position))
            .collect())
    }

    /// Stores new completed laps, returning the number of rows inserted.
    ///
    /// Laps without a duration (in progress, or timing data lost) are skipped
    /// rather than stored as nulls. A lap is identified by `(link, lap_number)`;
    /// the first record for a lap wins and replays insert nothing.
    pub async fn reconcile_laps(
        &self,
        records: &[LapRecord],
        links: &HashMap<(i32, i32), i32>,
    ) -> Result<u64, Error> {
        let lap_repo = LapRepository::new(self.db);

        let link_ids: Vec<i32> = links.values().copied().collect();
        let existing: HashSet<(i32, i32)> = lap_repo
            .find_keys_by_driver_session_ids(&link_ids)
            .await?
            .into_iter()
            .collect();

        let mut seen: HashSet<(i32, i32)> = HashSet::new();
        let mut to_insert: Vec<LapInsert> = Vec::new();

        for record in records {
            let (Some(driver_number), Some(session_key), Some(lap_number)) =
                (record.driver_number, record.session_key, record.lap_number)
            else {
                tracing::debug!("Skipping lap record with missing fields");
                continue;
            };

            let Some(lap_duration) = record.lap_duration else {
                tracing::debug!(
                    "Skipping untimed lap {} for driver {} in session {}",
                    lap_number,
                    driver_number,
                    session_key
                );
                continue;
            };

            let Some(link_id) = links.get(&(driver_number, session_key)) else {
                tracing::debug!(
                    "Skipping lap for driver {} in session {} without a participation link",
                    driver_number,
                    session_key
                );
                continue;
            };

            let key = (*link_id, lap_number);
            if existing.contains(&key) || !seen.insert(key) {
                continue;
            }

            to_insert.push(LapInsert {
                driver_session_id: *link_id,
                lap_number,
                lap_time: lap_duration,
                lap_time_string: format_lap_time(lap_duration),
            });
        }

        let inserted = lap_repo.insert_many(to_insert).await?;

        Ok(inserted)
    }
}
