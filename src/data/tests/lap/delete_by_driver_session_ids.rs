//! Tests for LapRepository::delete_by_driver_session_ids method.

use super::*;

/// Expect only laps under the given participations to be removed
#[tokio::test]
async fn deletes_only_targeted_participations() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_sync_tables().build().await?;
    let lap_1 = test.f1().insert_mock_lap(1, 9101, 1, Some(95.0)).await?;
    test.f1().insert_mock_lap(1, 9101, 2, Some(94.2)).await?;
    let lap_3 = test.f1().insert_mock_lap(44, 9102, 1, Some(93.8)).await?;

    let lap_repo = LapRepository::new(&test.state.db);
    let deleted = lap_repo
        .delete_by_driver_session_ids(&[lap_1.driver_session_id])
        .await?;

    assert_eq!(deleted, 2);

    let remaining = entity::prelude::Lap::find().all(&test.state.db).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].driver_session_id, lap_3.driver_session_id);

    Ok(())
}

/// Expect Ok(0) when no participations are given
#[tokio::test]
async fn returns_zero_for_empty_input() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_sync_tables().build().await?;
    test.f1().insert_mock_lap(1, 9101, 1, Some(95.0)).await?;

    let lap_repo = LapRepository::new(&test.state.db);
    let deleted = lap_repo.delete_by_driver_session_ids(&[]).await?;

    assert_eq!(deleted, 0);

    let remaining = entity::prelude::Lap::find().all(&test.state.db).await?;
    assert_eq!(remaining.len(), 1);

    Ok(())
}
