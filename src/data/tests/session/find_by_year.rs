//! Tests for SessionRepository::find_by_year method.

use super::*;

/// Expect only the requested year's sessions, ordered by start time
#[tokio::test]
async fn returns_year_sessions_in_calendar_order() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Session)
        .build()
        .await?;

    let session_repo = SessionRepository::new(&test.state.db);
    // Key 9105 lands on a later July day than 9103, insert out of order.
    session_repo
        .upsert_many(vec![
            mock_session_upsert(9105, 2023, "Race"),
            mock_session_upsert(9103, 2023, "Qualifying"),
            mock_session_upsert(9201, 2024, "Race"),
        ])
        .await?;

    let sessions = session_repo.find_by_year(2023).await?;

    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].session_key, 9103);
    assert_eq!(sessions[1].session_key, 9105);
    assert!(sessions[0].date_start < sessions[1].date_start);

    Ok(())
}

/// Expect Ok with an empty Vec for a year with no sessions
#[tokio::test]
async fn returns_empty_for_unknown_year() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Session)
        .build()
        .await?;

    let session_repo = SessionRepository::new(&test.state.db);
    let sessions = session_repo.find_by_year(1999).await?;

    assert!(sessions.is_empty());

    Ok(())
}
