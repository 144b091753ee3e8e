use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
};

/// A cached session key entry for one season.
#[derive(Clone, Debug)]
pub struct SessionKeyCacheEntry {
    /// Upstream session key.
    pub session_key: i32,
    /// Display name at the time of caching.
    pub session_name: Option<String>,
    /// Session category at the time of caching.
    pub session_type: Option<String>,
    /// Session start at the time of caching.
    pub date_start: Option<NaiveDateTime>,
    /// Circuit location at the time of caching.
    pub location: Option<String>,
}

/// Repository for the per-season session key cache.
///
/// The cache remembers which session keys a season sync has already processed so an
/// incremental sync can skip roster fetches for known sessions.
pub struct SessionKeyCacheRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SessionKeyCacheRepository<'a, C> {
    /// Creates a new instance of [`SessionKeyCacheRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Replaces the cached entries for a season.
    pub async fn replace_year(
        &self,
        year: i32,
        entries: Vec<SessionKeyCacheEntry>,
    ) -> Result<(), DbErr> {
        entity::prelude::SessionKeyCache::delete_many()
            .filter(entity::session_key_cache::Column::Year.eq(year))
            .exec(self.db)
            .await?;

        if entries.is_empty() {
            return Ok(());
        }

        let entries = entries
            .into_iter()
            .map(|entry| entity::session_key_cache::ActiveModel {
                year: ActiveValue::Set(year),
                session_key: ActiveValue::Set(entry.session_key),
                session_name: ActiveValue::Set(entry.session_name),
                session_type: ActiveValue::Set(entry.session_type),
                date_start: ActiveValue::Set(entry.date_start),
                location: ActiveValue::Set(entry.location),
                last_updated: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            });

        entity::prelude::SessionKeyCache::insert_many(entries)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Fetches the cached session keys for a season.
    pub async fn get_session_keys(&self, year: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::SessionKeyCache::find()
            .select_only()
            .column(entity::session_key_cache::Column::SessionKey)
            .filter(entity::session_key_cache::Column::Year.eq(year))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }
}
