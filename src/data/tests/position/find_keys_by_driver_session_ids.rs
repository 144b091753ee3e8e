//! Tests for PositionRepository::find_keys_by_driver_session_ids method.

use super::*;

/// Expect only the requested participations' triples to be returned
#[tokio::test]
async fn returns_keys_scoped_to_participations() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_sync_tables().build().await?;
    let link_1 = test.f1().insert_mock_driver_session(1, 9101, None, false).await?;
    let link_2 = test.f1().insert_mock_driver_session(44, 9101, None, false).await?;
    test.f1().insert_mock_position(1, 9101, sample_time(14, 0), 1).await?;
    test.f1().insert_mock_position(1, 9101, sample_time(14, 5), 2).await?;
    test.f1().insert_mock_position(44, 9101, sample_time(14, 0), 2).await?;

    let position_repo = PositionRepository::new(&test.state.db);
    let keys = position_repo
        .find_keys_by_driver_session_ids(&[link_1.id])
        .await?;

    assert_eq!(keys.len(), 2);
    assert!(keys.iter().all(|(id, _, _)| *id == link_1.id));
    assert!(keys.contains(&(link_1.id, sample_time(14, 0), 1)));
    assert!(keys.contains(&(link_1.id, sample_time(14, 5), 2)));
    assert_ne!(link_1.id, link_2.id);

    Ok(())
}

/// Expect an empty result when no participations are given
#[tokio::test]
async fn returns_empty_for_empty_input() -> Result<(), TestError> {
    let test = TestBuilder::new().with_sync_tables().build().await?;

    let position_repo = PositionRepository::new(&test.state.db);
    let keys = position_repo.find_keys_by_driver_session_ids(&[]).await?;

    assert!(keys.is_empty());

    Ok(())
}
