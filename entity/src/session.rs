use sea_orm::entity::prelude::*;

/// A timed session (practice, qualifying, sprint, race), unique by the
/// upstream `session_key`. Timestamps are stored as naive UTC.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "session")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub session_key: i32,
    pub session_name: String,
    pub session_type: String,
    pub date_start: DateTime,
    pub date_end: Option<DateTime>,
    pub gmt_offset: Option<String>,
    pub meeting_key: Option<i32>,
    pub location: Option<String>,
    pub country_name: Option<String>,
    pub circuit_short_name: Option<String>,
    pub year: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::driver_session::Entity")]
    DriverSession,
}

impl Related<super::driver_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DriverSession.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
