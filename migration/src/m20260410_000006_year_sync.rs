use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(YearSync::Table)
                    .if_not_exists()
                    .col(pk_auto(YearSync::Id))
                    .col(integer_uniq(YearSync::Year))
                    .col(string(YearSync::Status))
                    .col(integer(YearSync::Progress))
                    .col(text_null(YearSync::Message))
                    .col(timestamp_null(YearSync::LastSynced))
                    .col(timestamp_null(YearSync::LastIncrementalSync))
                    .col(integer_null(YearSync::DriversCount))
                    .col(integer_null(YearSync::SessionsCount))
                    .col(string_null(YearSync::LeaseOwner))
                    .col(timestamp_null(YearSync::LeaseAcquiredAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(YearSync::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum YearSync {
    Table,
    Id,
    Year,
    Status,
    Progress,
    Message,
    LastSynced,
    LastIncrementalSync,
    DriversCount,
    SessionsCount,
    LeaseOwner,
    LeaseAcquiredAt,
}
