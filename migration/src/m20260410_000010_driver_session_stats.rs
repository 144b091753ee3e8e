use sea_orm_migration::{prelude::*, schema::*};

static IDX_DRIVER_SESSION_STATS_DRIVER_NUMBER_SESSION_KEY: &str =
    "idx-driver_session_stats-driver_number-session_key";
static IDX_DRIVER_SESSION_STATS_YEAR: &str = "idx-driver_session_stats-year";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DriverSessionStats::Table)
                    .if_not_exists()
                    .col(pk_auto(DriverSessionStats::Id))
                    .col(integer(DriverSessionStats::DriverNumber))
                    .col(string(DriverSessionStats::FullName))
                    .col(string_null(DriverSessionStats::TeamName))
                    .col(integer(DriverSessionStats::SessionKey))
                    .col(string(DriverSessionStats::SessionName))
                    .col(string(DriverSessionStats::SessionType))
                    .col(string_null(DriverSessionStats::Location))
                    .col(timestamp(DriverSessionStats::DateStart))
                    .col(integer_null(DriverSessionStats::FinalPosition))
                    .col(boolean(DriverSessionStats::FastestLap))
                    .col(integer(DriverSessionStats::Points))
                    .col(integer(DriverSessionStats::Year))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DRIVER_SESSION_STATS_DRIVER_NUMBER_SESSION_KEY)
                    .table(DriverSessionStats::Table)
                    .col(DriverSessionStats::DriverNumber)
                    .col(DriverSessionStats::SessionKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DRIVER_SESSION_STATS_YEAR)
                    .table(DriverSessionStats::Table)
                    .col(DriverSessionStats::Year)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DRIVER_SESSION_STATS_YEAR)
                    .table(DriverSessionStats::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DRIVER_SESSION_STATS_DRIVER_NUMBER_SESSION_KEY)
                    .table(DriverSessionStats::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DriverSessionStats::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum DriverSessionStats {
    Table,
    Id,
    DriverNumber,
    FullName,
    TeamName,
    SessionKey,
    SessionName,
    SessionType,
    Location,
    DateStart,
    FinalPosition,
    FastestLap,
    Points,
    Year,
}
