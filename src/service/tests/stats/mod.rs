
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait};

use super::*;
use crate::service::stats::{points_for, StatsService, RACE_POINTS, SPRINT_POINTS};
