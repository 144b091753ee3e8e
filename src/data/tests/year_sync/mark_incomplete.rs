//! Tests for YearSyncRepository::mark_incomplete and mark_error methods.

use super::*;

/// Expect an incomplete stop to keep progress and release the lease
#[tokio::test]
async fn keeps_progress_and_releases_lease() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::YearSync)
        .build()
        .await?;
    test.f1()
        .insert_mock_year_sync(2023, SyncStatus::InProgress)
        .await?;

    let year_sync_repo = YearSyncRepository::new(&test.state.db);
    year_sync_repo
        .update_progress(2023, 70, "Processing positions and laps...")
        .await?;
    year_sync_repo
        .mark_incomplete(2023, "Sync incomplete, stored data is partial and the run can be retried")
        .await?;

    let year_sync = year_sync_repo.find_by_year(2023).await?.unwrap();
    assert_eq!(year_sync.status, SyncStatus::Incomplete);
    assert_eq!(year_sync.progress, 70);
    assert!(year_sync
        .message
        .as_deref()
        .unwrap()
        .starts_with("Sync incomplete"));
    assert!(year_sync.lease_owner.is_none());
    assert!(year_sync.lease_acquired_at.is_none());

    Ok(())
}

/// Expect a failed stop to record the error and release the lease
#[tokio::test]
async fn error_records_message_and_releases_lease() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::YearSync)
        .build()
        .await?;
    test.f1()
        .insert_mock_year_sync(2023, SyncStatus::InProgress)
        .await?;

    let year_sync_repo = YearSyncRepository::new(&test.state.db);
    year_sync_repo
        .mark_error(2023, "No sessions found for year 2023")
        .await?;

    let year_sync = year_sync_repo.find_by_year(2023).await?.unwrap();
    assert_eq!(year_sync.status, SyncStatus::Error);
    assert_eq!(
        year_sync.message.as_deref(),
        Some("No sessions found for year 2023")
    );
    assert!(year_sync.lease_owner.is_none());

    Ok(())
}

/// Expect the incremental mark reset to touch only the given season
#[tokio::test]
async fn reset_incremental_sync_is_scoped_to_year() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::YearSync)
        .build()
        .await?;
    test.f1()
        .insert_mock_year_sync(2025, SyncStatus::InProgress)
        .await?;
    test.f1()
        .insert_mock_year_sync(2026, SyncStatus::InProgress)
        .await?;

    let mark = NaiveDate::from_ymd_opt(2026, 8, 20)
        .unwrap()
        .and_hms_opt(14, 0, 0)
        .unwrap();
    let year_sync_repo = YearSyncRepository::new(&test.state.db);
    year_sync_repo.mark_completed(2025, 20, 14, Some(mark)).await?;
    year_sync_repo.mark_completed(2026, 20, 14, Some(mark)).await?;
    year_sync_repo.reset_incremental_sync(2026).await?;

    let cleared = year_sync_repo.find_by_year(2026).await?.unwrap();
    assert!(cleared.last_incremental_sync.is_none());
    assert_eq!(cleared.status, SyncStatus::Completed);

    let untouched = year_sync_repo.find_by_year(2025).await?.unwrap();
    assert_eq!(untouched.last_incremental_sync, Some(mark));

    Ok(())
}
