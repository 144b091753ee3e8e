mod get_or_create;
mod mark_incomplete;

use chrono::{Duration, NaiveDate, Utc};
use entity::year_sync::SyncStatus;

use super::*;
use crate::data::year_sync::YearSyncRepository;
