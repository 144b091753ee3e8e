use sea_orm::entity::prelude::*;

/// A completed lap, unique per (driver_session, lap_number). `lap_time` is
/// the duration in seconds; laps the API reports without a duration are
/// never stored. `is_fastest` marks the single fastest race lap per session
/// and is rewritten by the stats refresh.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lap")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub driver_session_id: i32,
    pub lap_number: i32,
    pub lap_time: Option<f64>,
    pub lap_time_string: Option<String>,
    pub is_fastest: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::driver_session::Entity",
        from = "Column::DriverSessionId",
        to = "super::driver_session::Column::Id",
        on_delete = "Cascade"
    )]
    DriverSession,
}

impl Related<super::driver_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DriverSession.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
