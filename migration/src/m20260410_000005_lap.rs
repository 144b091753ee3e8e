use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260410_000003_driver_session::DriverSession;

static IDX_LAP_DRIVER_SESSION_ID_LAP_NUMBER: &str = "idx-lap-driver_session_id-lap_number";
static FK_LAP_DRIVER_SESSION_ID: &str = "fk-lap-driver_session_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lap::Table)
                    .if_not_exists()
                    .col(pk_auto(Lap::Id))
                    .col(integer(Lap::DriverSessionId))
                    .col(integer(Lap::LapNumber))
                    .col(double_null(Lap::LapTime))
                    .col(string_null(Lap::LapTimeString))
                    .col(boolean(Lap::IsFastest))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_LAP_DRIVER_SESSION_ID)
                            .from(Lap::Table, Lap::DriverSessionId)
                            .to(DriverSession::Table, DriverSession::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_LAP_DRIVER_SESSION_ID_LAP_NUMBER)
                    .table(Lap::Table)
                    .col(Lap::DriverSessionId)
                    .col(Lap::LapNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_LAP_DRIVER_SESSION_ID_LAP_NUMBER)
                    .table(Lap::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Lap::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Lap {
    Table,
    Id,
    DriverSessionId,
    LapNumber,
    LapTime,
    LapTimeString,
    IsFastest,
}
