//! Tests for YearSyncRepository::get_or_create method.

use super::*;

/// Expect a fresh not_started row for an untracked season
#[tokio::test]
async fn creates_not_started_row() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::YearSync)
        .build()
        .await?;

    let year_sync_repo = YearSyncRepository::new(&test.state.db);
    let year_sync = year_sync_repo.get_or_create(2023).await?;

    assert_eq!(year_sync.year, 2023);
    assert_eq!(year_sync.status, SyncStatus::NotStarted);
    assert_eq!(year_sync.progress, 0);
    assert!(year_sync.lease_owner.is_none());
    assert!(year_sync.last_incremental_sync.is_none());

    Ok(())
}

/// Expect the existing row to be returned unchanged
#[tokio::test]
async fn returns_existing_row() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::YearSync)
        .build()
        .await?;
    let existing = test
        .f1()
        .insert_mock_year_sync(2023, SyncStatus::Completed)
        .await?;

    let year_sync_repo = YearSyncRepository::new(&test.state.db);
    let year_sync = year_sync_repo.get_or_create(2023).await?;

    assert_eq!(year_sync.id, existing.id);
    assert_eq!(year_sync.status, SyncStatus::Completed);
    assert_eq!(year_sync.progress, 100);

    let all = year_sync_repo.find_all().await?;
    assert_eq!(all.len(), 1);

    Ok(())
}
