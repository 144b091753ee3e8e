
use chrono::NaiveDate;
use entity::year_sync::SyncStatus;
use sea_orm::EntityTrait;

use super::*;
use crate::data::year_sync::YearSyncRepository;
use crate::service::maintenance::MaintenanceService;
