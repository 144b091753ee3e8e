//! Tests for LapRepository::find_timed_by_driver_session_ids method.

use super::*;

/// Expect untimed laps to be excluded from the result
#[tokio::test]
async fn excludes_laps_without_a_time() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_sync_tables().build().await?;
    let link = test.f1().insert_mock_driver_session(1, 9101, None, false).await?;
    test.f1().insert_mock_lap(1, 9101, 1, None).await?;
    let timed = test.f1().insert_mock_lap(1, 9101, 2, Some(94.5)).await?;

    let lap_repo = LapRepository::new(&test.state.db);
    let laps = lap_repo.find_timed_by_driver_session_ids(&[link.id]).await?;

    assert_eq!(laps.len(), 1);
    assert_eq!(laps[0], (timed.id, link.id, 94.5));

    Ok(())
}

/// Expect only the requested participations' laps to be returned
#[tokio::test]
async fn returns_laps_scoped_to_participations() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_sync_tables().build().await?;
    let link_1 = test.f1().insert_mock_driver_session(1, 9101, None, false).await?;
    let link_2 = test.f1().insert_mock_driver_session(44, 9102, None, false).await?;
    test.f1().insert_mock_lap(1, 9101, 1, Some(95.0)).await?;
    test.f1().insert_mock_lap(44, 9102, 1, Some(94.0)).await?;

    let lap_repo = LapRepository::new(&test.state.db);
    let laps = lap_repo.find_timed_by_driver_session_ids(&[link_1.id]).await?;

    assert_eq!(laps.len(), 1);
    assert_eq!(laps[0].1, link_1.id);
    assert_ne!(link_1.id, link_2.id);

    Ok(())
}
