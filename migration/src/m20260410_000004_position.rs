use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260410_000003_driver_session::DriverSession;

static IDX_POSITION_DRIVER_SESSION_ID_DATE: &str = "idx-position-driver_session_id-date";
static FK_POSITION_DRIVER_SESSION_ID: &str = "fk-position-driver_session_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Position::Table)
                    .if_not_exists()
                    .col(pk_auto(Position::Id))
                    .col(integer(Position::DriverSessionId))
                    .col(timestamp(Position::Date))
                    .col(integer(Position::Position))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_POSITION_DRIVER_SESSION_ID)
                            .from(Position::Table, Position::DriverSessionId)
                            .to(DriverSession::Table, DriverSession::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Covers both the duplicate check and the latest-sample lookup used
        // for final position inference.
        manager
            .create_index(
                Index::create()
                    .name(IDX_POSITION_DRIVER_SESSION_ID_DATE)
                    .table(Position::Table)
                    .col(Position::DriverSessionId)
                    .col(Position::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_POSITION_DRIVER_SESSION_ID_DATE)
                    .table(Position::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Position::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Position {
    Table,
    Id,
    DriverSessionId,
    Date,
    Position,
}
