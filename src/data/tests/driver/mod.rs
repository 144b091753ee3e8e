mod get_ids_by_driver_numbers;

use openf1::model::DriverRecord;
use pitwall_test_utils::fixtures::f1::factory;

use super::*;
use crate::data::driver::DriverRepository;
