mod overwrite_final_positions;

use super::*;
use crate::data::driver_session::DriverSessionRepository;
