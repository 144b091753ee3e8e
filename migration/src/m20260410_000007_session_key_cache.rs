use sea_orm_migration::{prelude::*, schema::*};

static IDX_SESSION_KEY_CACHE_YEAR_SESSION_KEY: &str = "idx-session_key_cache-year-session_key";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SessionKeyCache::Table)
                    .if_not_exists()
                    .col(pk_auto(SessionKeyCache::Id))
                    .col(integer(SessionKeyCache::Year))
                    .col(integer(SessionKeyCache::SessionKey))
                    .col(string_null(SessionKeyCache::SessionName))
                    .col(string_null(SessionKeyCache::SessionType))
                    .col(timestamp_null(SessionKeyCache::DateStart))
                    .col(string_null(SessionKeyCache::Location))
                    .col(timestamp(SessionKeyCache::LastUpdated))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SESSION_KEY_CACHE_YEAR_SESSION_KEY)
                    .table(SessionKeyCache::Table)
                    .col(SessionKeyCache::Year)
                    .col(SessionKeyCache::SessionKey)
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
                    .name(IDX_SESSION_KEY_CACHE_YEAR_SESSION_KEY)
                    .table(SessionKeyCache::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SessionKeyCache::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SessionKeyCache {
    Table,
    Id,
    Year,
    SessionKey,
    SessionName,
    SessionType,
    DateStart,
    Location,
    LastUpdated,
}
