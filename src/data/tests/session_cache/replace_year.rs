//! Tests for SessionKeyCacheRepository::replace_year method.

use super::*;

/// Expect cached keys to be readable after a replace
#[tokio::test]
async fn stores_entries_for_season() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::SessionKeyCache)
        .build()
        .await?;

    let cache_repo = SessionKeyCacheRepository::new(&test.state.db);
    cache_repo
        .replace_year(2023, vec![mock_cache_entry(9101), mock_cache_entry(9102)])
        .await?;

    let mut keys = cache_repo.get_session_keys(2023).await?;
    keys.sort_unstable();
    assert_eq!(keys, vec![9101, 9102]);

    Ok(())
}

/// Expect a second replace to discard the previous entries
#[tokio::test]
async fn replaces_previous_entries() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::SessionKeyCache)
        .build()
        .await?;

    let cache_repo = SessionKeyCacheRepository::new(&test.state.db);
    cache_repo
        .replace_year(2023, vec![mock_cache_entry(9101), mock_cache_entry(9102)])
        .await?;
    cache_repo
        .replace_year(2023, vec![mock_cache_entry(9103)])
        .await?;

    let keys = cache_repo.get_session_keys(2023).await?;
    assert_eq!(keys, vec![9103]);

    Ok(())
}

/// Expect an empty replace to clear the season's cache
#[tokio::test]
async fn clears_season_on_empty_replace() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::SessionKeyCache)
        .build()
        .await?;

    let cache_repo = SessionKeyCacheRepository::new(&test.state.db);
    cache_repo
        .replace_year(2023, vec![mock_cache_entry(9101)])
        .await?;
    cache_repo.replace_year(2023, Vec::new()).await?;

    let keys = cache_repo.get_session_keys(2023).await?;
    assert!(keys.is_empty());

    Ok(())
}

/// Expect other seasons' caches to survive a replace
#[tokio::test]
async fn leaves_other_seasons_untouched() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::SessionKeyCache)
        .build()
        .await?;

    let cache_repo = SessionKeyCacheRepository::new(&test.state.db);
    cache_repo
        .replace_year(2022, vec![mock_cache_entry(8001)])
        .await?;
    cache_repo
        .replace_year(2023, vec![mock_cache_entry(9101)])
        .await?;

    let keys = cache_repo.get_session_keys(2022).await?;
    assert_eq!(keys, vec![8001]);

    Ok(())
}
