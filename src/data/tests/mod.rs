mod driver;
mod driver_session;
mod year_sync;

use pitwall_test_utils::prelude::*;

use super::*;
