//! Configuration tests for fsm-driver

use crate::DriverConfig;

fn idle() {}

#[test]
fn test_default_config() {
    let config = DriverConfig::default();
    assert_eq!(config.name, "fsm");
    assert!(config.idle_hook.is_none());
}

#[test]
fn test_builder_sets_fields() {
    let config = DriverConfig::builder().name("rover").idle_hook(idle).build();
    assert_eq!(config.name, "rover");
    assert!(config.idle_hook.is_some());
}
