//! Cron-driven automatic syncs.

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    config::Config,
    error::{sync::SyncError, Error},
    model::app::AppState,
    service::sync::SyncService,
};

/// Initialize and start the cron job scheduler for automatic syncs.
///
/// Each tick runs an incremental sync of the current season. A tick that finds
/// the season's lease already held logs and moves on; overlapping schedules
/// never pile up runs. With the schedule turned off in configuration no
/// scheduler is started at all.
pub async fn start_scheduler(config: &Config, state: &AppState) -> Result<(), Error> {
    let Some(cron_expression) = config.auto_sync_cron.clone() else {
        tracing::info!("Automatic sync disabled, no cron expression configured");
        return Ok(());
    };

    let sched = JobScheduler::new().await?;

    let state_clone = state.clone();
    let lease_timeout = chrono::Duration::minutes(config.lease_timeout_mins);

    sched
        .add(Job::new_async(cron_expression.as_str(), move |_, _| {
            let state = state_clone.clone();

            Box::pin(async move {
                let sync_service = SyncService::new(&state.db, &state.source_client)
                    .with_lease_timeout(lease_timeout);

                match sync_service.sync_current_year().await {
                    Ok(outcome) => tracing::info!(
                        "Scheduled sync for season {} finished as {}",
                        outcome.year,
                        outcome.status
                    ),
                    Err(Error::SyncError(SyncError::SyncInProgress(year))) => {
                        tracing::info!("Scheduled sync skipped, season {} already syncing", year)
                    }
                    Err(e) => tracing::error!("Error running scheduled sync: {:?}", e),
                }
            })
        })?)
        .await?;

    sched.start().await?;

    tracing::info!(
        "Automatic sync scheduled with cron expression {}",
        cron_expression
    );

    Ok(())
}
