//! Unit tests for fsm-engine

mod dispatch_test;
