use sea_orm::entity::prelude::*;

/// A single position sample: where a car was running at an instant during a
/// session. Samples are append-only; an identical (driver_session, date,
/// position) triple is never stored twice.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "position")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub driver_session_id: i32,
    pub date: DateTime,
    pub position: i32,
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
