use sea_orm::entity::prelude::*;

/// Per-driver season aggregates, derived entirely from the raw tables and
/// republished by the stats refresh. `position` is the championship standing
/// (1 = leader). Only drivers with at least one classified race appear.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "driver_stats")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub driver_number: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub year: i32,
    pub full_name: String,
    pub team_name: Option<String>,
    pub team_colour: Option<String>,
    pub country_code: Option<String>,
    pub headshot_url: Option<String>,
    pub is_active: bool,
    pub races: i32,
    pub points: i32,
    pub wins: i32,
    pub podiums: i32,
    pub fastest_laps: i32,
    pub average_position: Option<f64>,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
