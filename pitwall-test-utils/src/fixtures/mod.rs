pub mod f1;
