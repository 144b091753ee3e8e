use chrono::NaiveDateTime;
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// A session row ready for insertion, with wire timestamps already parsed.
#[derive(Clone, Debug)]
pub struct SessionUpsert {
    /// Upstream session key, unique across all seasons.
    pub session_key: i32,
    /// Display name, e.g. `Race` or `Qualifying`.
    pub session_name: String,
    /// Session category, e.g. `Race`, `Practice`.
    pub session_type: String,
    /// Session start in naive UTC.
    pub date_start: NaiveDateTime,
    /// Session end in naive UTC, when the API provided one.
    pub date_end: Option<NaiveDateTime>,
    /// Local UTC offset string as reported by the API.
    pub gmt_offset: Option<String>,
    /// Upstream meeting (event) key.
    pub meeting_key: Option<i32>,
    /// Circuit location name.
    pub location: Option<String>,
    /// Host country name.
    pub country_name: Option<String>,
    /// Short circuit identifier.
    pub circuit_short_name: Option<String>,
    /// Season the session belongs to.
    pub year: i32,
}

/// Repository for timed sessions keyed by upstream session key.
pub struct SessionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SessionRepository<'a, C> {
    /// Creates a new instance of [`SessionRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts or updates sessions by session key, overwriting descriptive fields.
    pub async fn upsert_many(
        &self,
        sessions: Vec<SessionUpsert>,
    ) -> Result<Vec<entity::session::Model>, DbErr> {
        if sessions.is_empty() {
            return Ok(Vec::new());
        }

        let sessions = sessions
            .into_iter()
            .map(|session| entity::session::ActiveModel {
                session_key: ActiveValue::Set(session.session_key),
                session_name: ActiveValue::Set(session.session_name),
                session_type: ActiveValue::Set(session.session_type),
                date_start: ActiveValue::Set(session.date_start),
                date_end: ActiveValue::Set(session.date_end),
                gmt_offset: ActiveValue::Set(session.gmt_offset),
                meeting_key: ActiveValue::Set(session.meeting_key),
                location: ActiveValue::Set(session.location),
                country_name: ActiveValue::Set(session.country_name),
                circuit_short_name: ActiveValue::Set(session.circuit_short_name),
                year: ActiveValue::Set(session.year),
                ..Default::default()
            });

        entity::prelude::Session::insert_many(sessions)
            .on_conflict(
                OnConflict::column(entity::session::Column::SessionKey)
                    .update_columns([
                        entity::session::Column::SessionName,
                        entity::session::Column::SessionType,
                        entity::session::Column::DateStart,
                        entity::session::Column::DateEnd,
                        entity::session::Column::GmtOffset,
                        entity::session::Column::MeetingKey,
                        entity::session::Column::Location,
                        entity::session::Column::CountryName,
                        entity::session::Column::CircuitShortName,
                        entity::session::Column::Year,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    /// Fetches `(id, session_key)` pairs for the given session keys.
    pub async fn get_ids_by_session_keys(
        &self,
        session_keys: &[i32],
    ) -> Result<Vec<(i32, i32)>, DbErr> {
        entity::prelude::Session::find()
            .select_only()
            .column(entity::session::Column::Id)
            .column(entity::session::Column::SessionKey)
            .filter(entity::session::Column::SessionKey.is_in(session_keys.iter().copied()))
            .into_tuple::<(i32, i32)>()
            .all(self.db)
            .await
    }

    /// Fetches all sessions of a season ordered by start time.
    pub async fn find_by_year(&self, year: i32) -> Result<Vec<entity::session::Model>, DbErr> {
        entity::prelude::Session::find()
            .filter(entity::session::Column::Year.eq(year))
            .order_by_asc(entity::session::Column::DateStart)
            .all(self.db)
            .await
    }

    /// Counts all stored sessions.
    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Session::find().count(self.db).await
    }
}
