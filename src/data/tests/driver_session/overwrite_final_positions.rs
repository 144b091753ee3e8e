//! Tests for DriverSessionRepository::overwrite_final_positions method.

use super::*;

/// Expect recorded positions to be replaced, not just filled in
#[tokio::test]
async fn replaces_recorded_positions() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::Driver)
        .with_table(entity::prelude::Session)
        .with_table(entity::prelude::DriverSession)
        .build()
        .await?;
    let link_1 = test.f1().insert_mock_driver_session(1, 9101, Some(2), false).await?;
    let link_2 = test.f1().insert_mock_driver_session(44, 9101, None, false).await?;

    let driver_session_repo = DriverSessionRepository::new(&test.state.db);
    let updated = driver_session_repo
        .overwrite_final_positions(vec![(link_1.id, 1), (link_2.id, 2)])
        .await?;

    assert_eq!(updated, 2);

    let links = driver_session_repo
        .find_by_session_ids(&[link_1.session_id])
        .await?;
    let first = links.iter().find(|link| link.id == link_1.id).unwrap();
    assert_eq!(first.final_position, Some(1));
    let second = links.iter().find(|link| link.id == link_2.id).unwrap();
    assert_eq!(second.final_position, Some(2));

    Ok(())
}

/// Expect links outside the update to keep their positions
#[tokio::test]
async fn leaves_other_links_alone() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::Driver)
        .with_table(entity::prelude::Session)
        .with_table(entity::prelude::DriverSession)
        .build()
        .await?;
    let link_1 = test.f1().insert_mock_driver_session(1, 9101, Some(2), false).await?;
    let link_2 = test.f1().insert_mock_driver_session(44, 9101, Some(3), false).await?;

    let driver_session_repo = DriverSessionRepository::new(&test.state.db);
    let updated = driver_session_repo
        .overwrite_final_positions(vec![(link_1.id, 1)])
        .await?;

    assert_eq!(updated, 1);

    let links = driver_session_repo
        .find_by_session_ids(&[link_2.session_id])
        .await?;
    let untouched = links.iter().find(|link| link.id == link_2.id).unwrap();
    assert_eq!(untouched.final_position, Some(3));

    Ok(())
}

/// Expect Ok(0) when no positions are provided
#[tokio::test]
async fn returns_zero_for_empty_input() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Driver)
        .with_table(entity::prelude::Session)
        .with_table(entity::prelude::DriverSession)
        .build()
        .await?;

    let driver_session_repo = DriverSessionRepository::new(&test.state.db);
    let updated = driver_session_repo
        .overwrite_final_positions(Vec::new())
        .await?;

    assert_eq!(updated, 0);

    Ok(())
}
