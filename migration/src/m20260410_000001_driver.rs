use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Driver::Table)
                    .if_not_exists()
                    .col(pk_auto(Driver::Id))
                    .col(integer_uniq(Driver::DriverNumber))
                    .col(string(Driver::FullName))
                    .col(string_null(Driver::TeamName))
                    .col(string_null(Driver::TeamColour))
                    .col(string_null(Driver::CountryCode))
                    .col(string_null(Driver::HeadshotUrl))
                    .col(boolean(Driver::IsActive))
                    .col(timestamp(Driver::LastUpdated))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Driver::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Driver {
    Table,
    Id,
    DriverNumber,
    FullName,
    TeamName,
    TeamColour,
    CountryCode,
    HeadshotUrl,
    IsActive,
    LastUpdated,
}
