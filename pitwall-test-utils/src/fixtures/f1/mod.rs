use crate::TestSetup;

pub mod data;
pub mod factory;
pub mod mockito;

impl TestSetup {
    pub fn f1<'a>(&'a mut self) -> F1Fixtures<'a> {
        F1Fixtures { setup: self }
    }
}

pub struct F1Fixtures<'a> {
    pub setup: &'a mut TestSetup,
}
