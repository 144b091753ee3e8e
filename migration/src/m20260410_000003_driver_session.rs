use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20260410_000001_driver::Driver, m20260410_000002_session::Session};

static IDX_DRIVER_SESSION_DRIVER_ID_SESSION_ID: &str = "idx-driver_session-driver_id-session_id";
static FK_DRIVER_SESSION_DRIVER_ID: &str = "fk-driver_session-driver_id";
static FK_DRIVER_SESSION_SESSION_ID: &str = "fk-driver_session-session_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // SQLite cannot add foreign keys after the fact, so they are part of
        // the create statement. Deleting a driver or session cascades to the
        // link row, which in turn owns positions and laps.
        manager
            .create_table(
                Table::create()
                    .table(DriverSession::Table)
                    .if_not_exists()
                    .col(pk_auto(DriverSession::Id))
                    .col(integer(DriverSession::DriverId))
                    .col(integer(DriverSession::SessionId))
                    .col(integer_null(DriverSession::FinalPosition))
                    .col(boolean(DriverSession::FastestLap))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_DRIVER_SESSION_DRIVER_ID)
                            .from(DriverSession::Table, DriverSession::DriverId)
                            .to(Driver::Table, Driver::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_DRIVER_SESSION_SESSION_ID)
                            .from(DriverSession::Table, DriverSession::SessionId)
                            .to(Session::Table, Session::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DRIVER_SESSION_DRIVER_ID_SESSION_ID)
                    .table(DriverSession::Table)
                    .col(DriverSession::DriverId)
                    .col(DriverSession::SessionId)
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
                    .name(IDX_DRIVER_SESSION_DRIVER_ID_SESSION_ID)
                    .table(DriverSession::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DriverSession::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum DriverSession {
    Table,
    Id,
    DriverId,
    SessionId,
    FinalPosition,
    FastestLap,
}
