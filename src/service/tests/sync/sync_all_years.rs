use super::*;

/// Expect the all-season walk to skip completed past seasons without a single
/// request, record a failing season's error outcome, and still carry on to run
/// the current season incrementally.
#[tokio::test]
async fn skips_completed_seasons_and_isolates_failures() -> Result<(), TestError> {
    let year = current_season_year();
    let failing_year = year - 1;
    let mark = Utc::now().naive_utc() - Duration::minutes(5);

    let mut builder = TestBuilder::new().with_sync_tables().with_stats_tables();
    for completed in MIN_SYNC_YEAR..failing_year {
        builder = builder.with_mock_year_sync(completed, SyncStatus::Completed);
    }
    let test = builder
        .with_mock_year_sync(year, SyncStatus::Completed)
        .with_sessions_endpoint(failing_year, Vec::new(), 1)
        .with_sessions_endpoint(
            year,
            vec![factory::mock_session_record(9201, year, "Race", "Race")],
            1,
        )
        .with_mock_endpoint(|server| empty_telemetry_endpoint(server, "/position"))
        .with_mock_endpoint(|server| empty_telemetry_endpoint(server, "/laps"))
        .build()
        .await?;
    YearSyncRepository::new(&test.state.db)
        .mark_completed(year, 1, 1, Some(mark))
        .await?;
    SessionKeyCacheRepository::new(&test.state.db)
        .replace_year(year, vec![cached_entry(9201)])
        .await?;

    let sync = SyncService::new(&test.state.db, &test.state.source_client);
    let outcomes = sync.sync_all_years().await;

    assert!(outcomes.is_ok(), "Error: {:?}", outcomes.err());
    let outcomes = outcomes.unwrap();
    // Skipped seasons produce no outcomes; an unexpected request for one would
    // go unmatched, fail that season, and show up as an extra outcome here.
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].year, failing_year);
    assert_eq!(outcomes[0].status, SyncStatus::Error);
    // An empty season is not going to fill in on a rerun.
    assert!(!outcomes[0].can_retry);
    assert!(outcomes[0]
        .message
        .as_deref()
        .unwrap()
        .contains("No sessions found"));
    assert_eq!(outcomes[1].year, year);
    assert_eq!(outcomes[1].status, SyncStatus::Completed);
    assert!(!outcomes[1].can_retry);

    let year_sync_repo = YearSyncRepository::new(&test.state.db);
    let failed = year_sync_repo.find_by_year(failing_year).await?.unwrap();
    assert_eq!(failed.status, SyncStatus::Error);
    let untouched = year_sync_repo.find_by_year(MIN_SYNC_YEAR).await?.unwrap();
    assert_eq!(untouched.status, SyncStatus::Completed);
    assert_eq!(untouched.progress, 100);
    let current = year_sync_repo.find_by_year(year).await?.unwrap();
    assert!(current.last_incremental_sync.unwrap() > mark);

    test.assert_mocks();

    Ok(())
}

/// Expect a season whose lease another runner holds to be skipped without an
/// outcome, while the walk continues past it.
#[tokio::test]
async fn skips_a_season_locked_by_another_runner() -> Result<(), TestError> {
    let year = current_season_year();
    let locked_year = year - 1;
    let mark = Utc::now().naive_utc() - Duration::minutes(5);

    let mut builder = TestBuilder::new().with_sync_tables().with_stats_tables();
    for completed in MIN_SYNC_YEAR..locked_year {
        builder = builder.with_mock_year_sync(completed, SyncStatus::Completed);
    }
    let test = builder
        .with_mock_year_sync(locked_year, SyncStatus::InProgress)
        .with_mock_year_sync(year, SyncStatus::Completed)
        .with_sessions_endpoint(
            year,
            vec![factory::mock_session_record(9201, year, "Race", "Race")],
            1,
        )
        .with_mock_endpoint(|server| empty_telemetry_endpoint(server, "/position"))
        .with_mock_endpoint(|server| empty_telemetry_endpoint(server, "/laps"))
        .build()
        .await?;
    YearSyncRepository::new(&test.state.db)
        .mark_completed(year, 1, 1, Some(mark))
        .await?;
    SessionKeyCacheRepository::new(&test.state.db)
        .replace_year(year, vec![cached_entry(9201)])
        .await?;

    let sync = SyncService::new(&test.state.db, &test.state.source_client);
    let outcomes = sync.sync_all_years().await;

    assert!(outcomes.is_ok(), "Error: {:?}", outcomes.err());
    let outcomes = outcomes.unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].year, year);
    assert_eq!(outcomes[0].status, SyncStatus::Completed);

    let locked = YearSyncRepository::new(&test.state.db)
        .find_by_year(locked_year)
        .await?
        .unwrap();
    assert_eq!(locked.status, SyncStatus::InProgress);
    assert_eq!(locked.lease_owner.as_deref(), Some("fixture"));

    test.assert_mocks();

    Ok(())
}
