//! Tests for DriverRepository::get_ids_by_driver_numbers method.

use super::*;

/// Expect pairs only for car numbers that exist
#[tokio::test]
async fn returns_ids_for_known_numbers_only() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::Driver)
        .build()
        .await?;
    let driver_1 = test.f1().insert_mock_driver(1).await?;
    let driver_44 = test.f1().insert_mock_driver(44).await?;

    let driver_repo = DriverRepository::new(&test.state.db);
    let result = driver_repo.get_ids_by_driver_numbers(&[1, 44, 99]).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let mut pairs = result.unwrap();
    pairs.sort();

    assert_eq!(pairs, vec![(driver_1.id, 1), (driver_44.id, 44)]);

    Ok(())
}

/// Expect Ok with an empty Vec when no numbers are requested
#[tokio::test]
async fn returns_empty_for_empty_input() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Driver)
        .build()
        .await?;

    let driver_repo = DriverRepository::new(&test.state.db);
    let pairs = driver_repo.get_ids_by_driver_numbers(&[]).await?;

    assert!(pairs.is_empty());

    Ok(())
}
