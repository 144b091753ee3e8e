use sea_orm::entity::prelude::*;

/// Flattened per-driver-per-session results with points applied, derived by
/// the stats refresh. One row per (driver_number, session_key).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "driver_session_stats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub driver_number: i32,
    pub full_name: String,
    pub team_name: Option<String>,
    pub session_key: i32,
    pub session_name: String,
    pub session_type: String,
    pub location: Option<String>,
    pub date_start: DateTime,
    pub final_position: Option<i32>,
    pub fastest_lap: bool,
    pub points: i32,
    pub year: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
