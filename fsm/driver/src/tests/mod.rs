//! Unit tests for fsm-driver

mod config_test;
mod driver_test;
