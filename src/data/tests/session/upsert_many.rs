//! Tests for SessionRepository::upsert_many method.

use super::*;

/// Expect Ok with created models when upserting new sessions
#[tokio::test]
async fn inserts_new_sessions() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Session)
        .build()
        .await?;

    let session_repo = SessionRepository::new(&test.state.db);
    let result = session_repo
        .upsert_many(vec![
            mock_session_upsert(9101, 2023, "Race"),
            mock_session_upsert(9102, 2023, "Qualifying"),
        ])
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let sessions = result.unwrap();
    assert_eq!(sessions.len(), 2);

    Ok(())
}

/// Expect descriptive fields to be overwritten when the session key already exists
#[tokio::test]
async fn updates_existing_session_by_key() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Session)
        .build()
        .await?;

    let session_repo = SessionRepository::new(&test.state.db);
    let first = session_repo
        .upsert_many(vec![mock_session_upsert(9101, 2023, "Race")])
        .await?;

    let mut renamed = mock_session_upsert(9101, 2023, "Race");
    renamed.session_name = "Sprint".to_string();
    renamed.location = Some("Spielberg".to_string());
    let second = session_repo.upsert_many(vec![renamed]).await?;

    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id, first[0].id);
    assert_eq!(second[0].session_name, "Sprint");
    assert_eq!(second[0].location.as_deref(), Some("Spielberg"));

    let count = session_repo.count().await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Expect Ok with an empty Vec when upserting nothing
#[tokio::test]
async fn returns_empty_for_empty_input() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Session)
        .build()
        .await?;

    let session_repo = SessionRepository::new(&test.state.db);
    let result = session_repo.upsert_many(Vec::new()).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert!(result.unwrap().is_empty());

    Ok(())
}

/// Expect `(id, session_key)` pairs only for keys that exist
#[tokio::test]
async fn get_ids_returns_known_keys_only() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Session)
        .build()
        .await?;

    let session_repo = SessionRepository::new(&test.state.db);
    let stored = session_repo
        .upsert_many(vec![mock_session_upsert(9101, 2023, "Race")])
        .await?;

    let pairs = session_repo.get_ids_by_session_keys(&[9101, 9999]).await?;

    assert_eq!(pairs, vec![(stored[0].id, 9101)]);

    Ok(())
}
