use thiserror::Error;

/// Synchronization errors raised while running a season sync.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Another runner holds the sync lease for this year.
    ///
    /// Raised when a sync is requested while an unexpired lease exists. The conflicting
    /// runner keeps its lease; no sync state is modified by the losing request.
    #[error("Sync already in progress for year {0}")]
    SyncInProgress(i32),
    /// The sessions endpoint returned no sessions for the requested year.
    #[error("No sessions found for year {0}")]
    NoSessionsFound(i32),
    /// No drivers were returned across every session roster of the requested year.
    #[error("No drivers found for year {0}")]
    NoDriversFound(i32),
    /// The requested year falls outside the syncable range.
    #[error("Invalid year {year}: expected a season between {min} and {max}")]
    InvalidYear {
        /// Year that was requested.
        year: i32,
        /// Earliest syncable season.
        min: i32,
        /// Latest syncable season.
        max: i32,
    },
}
