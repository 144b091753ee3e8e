use sea_orm_migration::{prelude::*, schema::*};

static IDX_DRIVER_STATS_YEAR: &str = "idx-driver_stats-year";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DriverStats::Table)
                    .if_not_exists()
                    .col(integer(DriverStats::DriverNumber))
                    .col(integer(DriverStats::Year))
                    .col(string(DriverStats::FullName))
                    .col(string_null(DriverStats::TeamName))
                    .col(string_null(DriverStats::TeamColour))
                    .col(string_null(DriverStats::CountryCode))
                    .col(string_null(DriverStats::HeadshotUrl))
                    .col(boolean(DriverStats::IsActive))
                    .col(integer(DriverStats::Races))
                    .col(integer(DriverStats::Points))
                    .col(integer(DriverStats::Wins))
                    .col(integer(DriverStats::Podiums))
                    .col(integer(DriverStats::FastestLaps))
                    .col(double_null(DriverStats::AveragePosition))
                    .col(integer(DriverStats::Position))
                    .primary_key(
                        Index::create()
                            .col(DriverStats::DriverNumber)
                            .col(DriverStats::Year),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DRIVER_STATS_YEAR)
                    .table(DriverStats::Table)
                    .col(DriverStats::Year)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DRIVER_STATS_YEAR)
                    .table(DriverStats::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DriverStats::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum DriverStats {
    Table,
    DriverNumber,
    Year,
    FullName,
    TeamName,
    TeamColour,
    CountryCode,
    HeadshotUrl,
    IsActive,
    Races,
    Points,
    Wins,
    Podiums,
    FastestLaps,
    AveragePosition,
    Position,
}
