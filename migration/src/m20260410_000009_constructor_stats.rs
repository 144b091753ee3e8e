use sea_orm_migration::{prelude::*, schema::*};

static IDX_CONSTRUCTOR_STATS_YEAR: &str = "idx-constructor_stats-year";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ConstructorStats::Table)
                    .if_not_exists()
                    .col(string(ConstructorStats::TeamName))
                    .col(integer(ConstructorStats::Year))
                    .col(string_null(ConstructorStats::TeamColour))
                    .col(integer(ConstructorStats::Position))
                    .col(integer(ConstructorStats::Points))
                    .col(integer(ConstructorStats::Podiums))
                    .col(integer(ConstructorStats::Wins))
                    .col(integer(ConstructorStats::FastestLaps))
                    .col(integer(ConstructorStats::Races))
                    .primary_key(
                        Index::create()
                            .col(ConstructorStats::TeamName)
                            .col(ConstructorStats::Year),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CONSTRUCTOR_STATS_YEAR)
                    .table(ConstructorStats::Table)
                    .col(ConstructorStats::Year)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CONSTRUCTOR_STATS_YEAR)
                    .table(ConstructorStats::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ConstructorStats::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ConstructorStats {
    Table,
    TeamName,
    Year,
    TeamColour,
    Position,
    Points,
    Podiums,
    Wins,
    FastestLaps,
    Races,
}
