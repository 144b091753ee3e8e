mod maintenance;
mod stats;
mod sync;

use pitwall_test_utils::prelude::*;

use super::*;
