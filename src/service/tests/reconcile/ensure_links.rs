//! Tests for ReconcileService::ensure_links method.

use super::*;

/// Expect one link per distinct pair even when the input repeats
#[tokio::test]
async fn creates_links_once_for_repeated_pairs() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::Driver)
        .with_table(entity::prelude::Session)
        .with_table(entity::prelude::DriverSession)
        .build()
        .await?;
    let driver = test.f1().insert_mock_driver(1).await?;
    let session = test.f1().insert_mock_session(9101, 2023, "Race", "Race").await?;

    let driver_ids = HashMap::from([(1, driver.id)]);
    let session_ids = HashMap::from([(9101, session.id)]);

    let reconcile = ReconcileService::new(&test.state.db);
    let result = reconcile
        .ensure_links(&[(1, 9101), (1, 9101)], &driver_ids, &session_ids)
        .await;

    assert!(result.is_ok());
    let links = result.unwrap();
    assert_eq!(links.len(), 1);
    assert!(links.contains_key(&(1, 9101)));

    let stored = entity::prelude::DriverSession::find().all(&test.state.db).await?;
    assert_eq!(stored.len(), 1);

    Ok(())
}

/// Expect an existing link to be reused instead of duplicated
#[tokio::test]
async fn reuses_existing_links() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::Driver)
        .with_table(entity::prelude::Session)
        .with_table(entity::prelude::DriverSession)
        .build()
        .await?;
    let existing = test.f1().insert_mock_driver_session(1, 9101, None, false).await?;

    let driver_ids = HashMap::from([(1, existing.driver_id)]);
    let session_ids = HashMap::from([(9101, existing.session_id)]);

    let reconcile = ReconcileService::new(&test.state.db);
    let result = reconcile
        .ensure_links(&[(1, 9101)], &driver_ids, &session_ids)
        .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().get(&(1, 9101)), Some(&existing.id));

    let stored = entity::prelude::DriverSession::find().all(&test.state.db).await?;
    assert_eq!(stored.len(), 1);

    Ok(())
}

/// Expect pairs absent from the id maps to be skipped
#[tokio::test]
async fn skips_pairs_missing_from_id_maps() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::Driver)
        .with_table(entity::prelude::Session)
        .with_table(entity::prelude::DriverSession)
        .build()
        .await?;
    let driver = test.f1().insert_mock_driver(1).await?;
    let session = test.f1().insert_mock_session(9101, 2023, "Race", "Race").await?;

    let driver_ids = HashMap::from([(1, driver.id)]);
    let session_ids = HashMap::from([(9101, session.id)]);

    let reconcile = ReconcileService::new(&test.state.db);
    let result = reconcile
        .ensure_links(&[(1, 9101), (99, 9101), (1, 9999)], &driver_ids, &session_ids)
        .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().len(), 1);

    let stored = entity::prelude::DriverSession::find().all(&test.state.db).await?;
    assert_eq!(stored.len(), 1);

    Ok(())
}
