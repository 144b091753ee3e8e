use sea_orm_migration::{prelude::*, schema::*};

static IDX_SESSION_YEAR: &str = "idx-session-year";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Session::Table)
                    .if_not_exists()
                    .col(pk_auto(Session::Id))
                    .col(integer_uniq(Session::SessionKey))
                    .col(string(Session::SessionName))
                    .col(string(Session::SessionType))
                    .col(timestamp(Session::DateStart))
                    .col(timestamp_null(Session::DateEnd))
                    .col(string_null(Session::GmtOffset))
                    .col(integer_null(Session::MeetingKey))
                    .col(string_null(Session::Location))
                    .col(string_null(Session::CountryName))
                    .col(string_null(Session::CircuitShortName))
                    .col(integer(Session::Year))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SESSION_YEAR)
                    .table(Session::Table)
                    .col(Session::Year)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SESSION_YEAR)
                    .table(Session::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Session::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Session {
    Table,
    Id,
    SessionKey,
    SessionName,
    SessionType,
    DateStart,
    DateEnd,
    GmtOffset,
    MeetingKey,
    Location,
    CountryName,
    CircuitShortName,
    Year,
}
