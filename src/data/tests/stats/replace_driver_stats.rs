//! Tests for StatsRepository::replace_driver_stats method.

use super::*;

/// Expect standings to come back in championship order
#[tokio::test]
async fn stores_rows_in_championship_order() -> Result<(), TestError> {
    let test = TestBuilder::new().with_stats_tables().build().await?;

    let stats_repo = StatsRepository::new(&test.state.db);
    stats_repo
        .replace_driver_stats(
            2023,
            vec![
                mock_driver_stats_row(44, 2023, 180, 2),
                mock_driver_stats_row(1, 2023, 250, 1),
            ],
        )
        .await?;

    let standings = stats_repo.get_driver_stats(2023).await?;
    assert_eq!(standings.len(), 2);
    assert_eq!(standings[0].driver_number, 1);
    assert_eq!(standings[0].position, 1);
    assert_eq!(standings[1].driver_number, 44);

    Ok(())
}

/// Expect a refresh to discard the previous season partition
#[tokio::test]
async fn replaces_previous_partition() -> Result<(), TestError> {
    let test = TestBuilder::new().with_stats_tables().build().await?;

    let stats_repo = StatsRepository::new(&test.state.db);
    stats_repo
        .replace_driver_stats(2023, vec![mock_driver_stats_row(1, 2023, 250, 1)])
        .await?;
    stats_repo
        .replace_driver_stats(2023, vec![mock_driver_stats_row(44, 2023, 260, 1)])
        .await?;

    let standings = stats_repo.get_driver_stats(2023).await?;
    assert_eq!(standings.len(), 1);
    assert_eq!(standings[0].driver_number, 44);

    Ok(())
}

/// Expect other seasons to survive a replace
#[tokio::test]
async fn leaves_other_seasons_untouched() -> Result<(), TestError> {
    let test = TestBuilder::new().with_stats_tables().build().await?;

    let stats_repo = StatsRepository::new(&test.state.db);
    stats_repo
        .replace_driver_stats(2022, vec![mock_driver_stats_row(1, 2022, 454, 1)])
        .await?;
    stats_repo.replace_driver_stats(2023, Vec::new()).await?;

    let standings = stats_repo.get_driver_stats(2022).await?;
    assert_eq!(standings.len(), 1);

    Ok(())
}
