use sea_orm::entity::prelude::*;

/// Link between a driver and a session they took part in; one row per
/// (driver, session) pair. Owns that pairing's positions and laps, which
/// cascade on delete. `final_position` is inferred from the latest position
/// sample once telemetry has been ingested.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "driver_session")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub driver_id: i32,
    pub session_id: i32,
    pub final_position: Option<i32>,
    pub fastest_lap: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::driver::Entity",
        from = "Column::DriverId",
        to = "super::driver::Column::Id",
        on_delete = "Cascade"
    )]
    Driver,
    #[sea_orm(
        belongs_to = "super::session::Entity",
        from = "Column::SessionId",
        to = "super::session::Column::Id",
        on_delete = "Cascade"
    )]
    Session,
    #[sea_orm(has_many = "super::position::Entity")]
    Position,
    #[sea_orm(has_many = "super::lap::Entity")]
    Lap,
}

impl Related<super::driver::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Driver.def()
    }
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::position::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Position.def()
    }
}

impl Related<super::lap::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lap.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
