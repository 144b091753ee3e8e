use sea_orm::entity::prelude::*;

/// A driver, unique by car number across all seasons. Roster fields reflect
/// the most recent sync; `is_active` distinguishes the current grid from
/// drivers only seen in past seasons.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "driver")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub driver_number: i32,
    pub full_name: String,
    pub team_name: Option<String>,
    pub team_colour: Option<String>,
    pub country_code: Option<String>,
    pub headshot_url: Option<String>,
    pub is_active: bool,
    pub last_updated: DateTime,
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
