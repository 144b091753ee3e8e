use sea_orm::entity::prelude::*;

/// Cached session listing for a year, so repeated syncs skip the `/sessions`
/// round trip. One row per (year, session_key); refreshed wholesale when the
/// year is fetched again.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "session_key_cache")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub year: i32,
    pub session_key: i32,
    pub session_name: Option<String>,
    pub session_type: Option<String>,
    pub date_start: Option<DateTime>,
    pub location: Option<String>,
    pub last_updated: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
