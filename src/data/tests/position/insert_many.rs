//! Tests for PositionRepository::insert_many method.

use super::*;

/// Expect all samples to be stored and counted
#[tokio::test]
async fn inserts_samples_and_reports_count() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_sync_tables().build().await?;
    let link = test.f1().insert_mock_driver_session(1, 9101, None, false).await?;

    let position_repo = PositionRepository::new(&test.state.db);
    let inserted = position_repo
        .insert_many(vec![
            (link.id, sample_time(14, 0), 3),
            (link.id, sample_time(14, 5), 2),
            (link.id, sample_time(14, 10), 1),
        ])
        .await?;

    assert_eq!(inserted, 3);

    let keys = position_repo
        .find_keys_by_driver_session_ids(&[link.id])
        .await?;
    assert_eq!(keys.len(), 3);

    Ok(())
}

/// Expect a failing row to be skipped while the rest of its batch lands
#[tokio::test]
async fn keeps_good_rows_when_one_fails() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_sync_tables().build().await?;
    let link = test.f1().insert_mock_driver_session(1, 9101, None, false).await?;

    // The dangling participation id violates the foreign key and sinks the
    // whole multi-row insert; the per-row retry salvages the other two.
    let position_repo = PositionRepository::new(&test.state.db);
    let inserted = position_repo
        .insert_many(vec![
            (link.id, sample_time(14, 0), 3),
            (9999, sample_time(14, 5), 2),
            (link.id, sample_time(14, 10), 1),
        ])
        .await?;

    assert_eq!(inserted, 2);

    let keys = position_repo
        .find_keys_by_driver_session_ids(&[link.id])
        .await?;
    assert_eq!(keys.len(), 2);

    Ok(())
}

/// Expect Ok(0) when no samples are provided
#[tokio::test]
async fn returns_zero_for_empty_input() -> Result<(), TestError> {
    let test = TestBuilder::new().with_sync_tables().build().await?;

    let position_repo = PositionRepository::new(&test.state.db);
    let inserted = position_repo.insert_many(Vec::new()).await?;

    assert_eq!(inserted, 0);

    Ok(())
}

/// Expect payloads above one insert batch to be stored completely
#[tokio::test]
async fn inserts_large_payloads_in_batches() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_sync_tables().build().await?;
    let link = test.f1().insert_mock_driver_session(1, 9101, None, false).await?;

    // 250 samples spans three 100-row insert batches.
    let positions: Vec<(i32, chrono::NaiveDateTime, i32)> = (0..250)
        .map(|i| (link.id, sample_time(14, 0) + chrono::Duration::seconds(i), 1))
        .collect();

    let position_repo = PositionRepository::new(&test.state.db);
    let inserted = position_repo.insert_many(positions).await?;

    assert_eq!(inserted, 250);

    let keys = position_repo
        .find_keys_by_driver_session_ids(&[link.id])
        .await?;
    assert_eq!(keys.len(), 250);

    Ok(())
}
