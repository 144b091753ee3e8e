use pitwall::{
    config::Config,
    error::Error,
    model::app::AppState,
    scheduler::start_scheduler,
    service::{status::StatusService, sync::SyncService},
    startup::{build_source_client, connect_to_database},
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting pitwall");

    if let Err(error) = run().await {
        tracing::error!("Fatal error: {}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;

    let source_client = build_source_client(&config)?;
    let db = connect_to_database(&config).await?;
    let state = AppState { db, source_client };

    let overview = StatusService::new(&state.db).get_overview().await?;
    tracing::info!(
        "Store holds {} drivers and {} sessions across {} tracked seasons",
        overview.total_drivers,
        overview.total_sessions,
        overview.years.len()
    );

    // Catch up every season before handing off to the scheduler; completed
    // seasons are skipped, so restarts are cheap.
    let sync_service = SyncService::new(&state.db, &state.source_client)
        .with_lease_timeout(chrono::Duration::minutes(config.lease_timeout_mins));
    let outcomes = sync_service.sync_all_years().await?;
    for outcome in &outcomes {
        if outcome.can_retry {
            tracing::warn!(
                "Season {}: {}, stored data is partial and a rerun will resume it",
                outcome.year,
                outcome.status
            );
        } else {
            tracing::info!(
                "Season {}: {} ({} drivers, {} sessions)",
                outcome.year,
                outcome.status,
                outcome.drivers_count,
                outcome.sessions_count
            );
        }
    }

    start_scheduler(&config, &state).await?;

    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", error);
    }
    tracing::info!("Shutting down");

    Ok(())
}
