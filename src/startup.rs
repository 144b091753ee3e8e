//! Application startup: building the API client and connecting the database.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::{config::Config, error::Error};

/// Build and configure the OpenF1 client from application configuration
pub fn build_source_client(config: &Config) -> Result<openf1::Client, Error> {
    let mut builder = openf1::Client::builder()
        .user_agent(&config.user_agent)
        .max_retries(config.max_retries)
        .initial_backoff(config.initial_backoff)
        .window_cooldown(config.window_cooldown)
        .timeout(config.request_timeout);

    if let Some(base_url) = &config.source_base_url {
        builder = builder.base_url(base_url);
    }

    let source_client = builder.build()?;

    Ok(source_client)
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}
