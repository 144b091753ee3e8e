//! Calendar-month chunking for date-range queries.
//!
//! Position and lap endpoints can return months of telemetry in one response;
//! unbounded ranges time out or trip the rate limiter. Long ranges are split
//! into month-sized windows issued sequentially with a cooldown in between.

use chrono::{DateTime, Months, Utc};
use serde::de::DeserializeOwned;

use crate::{client::Client, error::Error};

/// Fetch a date range from an endpoint in calendar-month windows.
///
/// Walks `[start, end)` one calendar month at a time (a window starting
/// Jan 31 ends Feb 28/29) and concatenates the results in window order. Each
/// window queries `{date_param}>` / `{date_param}<`, so bounds are
/// end-exclusive: a record timestamped exactly at a window edge lands in the
/// following window, and no record is fetched twice. Sleeps the client's
/// window cooldown between windows, not after the last.
///
/// `start >= end` issues no requests and returns an empty Vec.
///
/// # Arguments
/// - `endpoint` - Path relative to the base URL, e.g. `"laps"`
/// - `date_param` - The endpoint's timestamp field, e.g. `"date_start"`
/// - `start` / `end` - UTC range bounds
pub async fn fetch_range_by_month<T: DeserializeOwned>(
    client: &Client,
    endpoint: &str,
    date_param: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<T>, Error> {
    let mut results = Vec::new();
    let mut current = start;

    while current < end {
        let next = match current.checked_add_months(Months::new(1)) {
            Some(candidate) => candidate.min(end),
            None => {
                return Err(Error::InvalidRange(format!(
                    "cannot advance {current} by one month"
                )))
            }
        };

        tracing::debug!(
            endpoint,
            window_start = %current,
            window_end = %next,
            "fetching month window"
        );

        let params = [
            (format!("{date_param}>"), current.to_rfc3339()),
            (format!("{date_param}<"), next.to_rfc3339()),
        ];
        let mut window: Vec<T> = client.fetch(endpoint, &params).await?;
        results.append(&mut window);

        current = next;
        if current < end {
            tokio::time::sleep(client.window_cooldown()).await;
        }
    }

    Ok(results)
}
