//! Tests for engine configuration loading and validation.

use std::collections::HashMap;

use slot_engine::config::UNIT_MINUTES_ENV;
use slot_engine::{EngineConfig, SlotError};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn default_unit_is_one_hour() {
    assert_eq!(EngineConfig::default().unit_minutes, 60);
}

#[test]
fn json_fields_are_optional() {
    assert_eq!(EngineConfig::from_json_str("{}").unwrap(), EngineConfig::default());
    assert_eq!(
        EngineConfig::from_json_str(r#"{"unit_minutes": 45}"#).unwrap().unit_minutes,
        45
    );
}

#[test]
fn unknown_json_fields_are_rejected() {
    assert!(matches!(
        EngineConfig::from_json_str(r#"{"unit_minute": 45}"#),
        Err(SlotError::InvalidConfig(_))
    ));
}

#[test]
fn out_of_range_unit_is_rejected() {
    assert!(EngineConfig { unit_minutes: 0 }.validate().is_err());
    assert!(EngineConfig { unit_minutes: 1441 }.validate().is_err());
    assert!(EngineConfig { unit_minutes: 1440 }.validate().is_ok());
    assert!(EngineConfig::from_json_str(r#"{"unit_minutes": 0}"#).is_err());
}

#[test]
fn env_override_wins_over_file_value() {
    let config = EngineConfig { unit_minutes: 45 }
        .with_overrides_from(lookup(&[(UNIT_MINUTES_ENV, "30")]))
        .unwrap();
    assert_eq!(config.unit_minutes, 30);
}

#[test]
fn missing_env_keeps_value() {
    let config = EngineConfig { unit_minutes: 45 }
        .with_overrides_from(lookup(&[]))
        .unwrap();
    assert_eq!(config.unit_minutes, 45);
}

#[test]
fn malformed_env_value_is_an_error() {
    let result = EngineConfig::default().with_overrides_from(lookup(&[(UNIT_MINUTES_ENV, "hour")]));
    assert!(matches!(result, Err(SlotError::InvalidConfig(_))));
}

#[test]
fn missing_file_is_an_error() {
    let result = EngineConfig::from_file("/nonexistent/slot-engine/config.json");
    assert!(matches!(result, Err(SlotError::InvalidConfig(_))));
}
