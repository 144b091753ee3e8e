use sea_orm::entity::prelude::*;

/// Per-constructor season aggregates, summed over the team's drivers.
/// Derived and republished by the stats refresh; drivers without a team are
/// excluded.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "constructor_stats")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub team_name: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub year: i32,
    pub team_colour: Option<String>,
    pub position: i32,
    pub points: i32,
    pub podiums: i32,
    pub wins: i32,
    pub fastest_laps: i32,
    pub races: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
