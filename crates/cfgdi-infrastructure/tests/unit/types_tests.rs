//! Application configuration type tests

use cfgdi_infrastructure::AppConfig;
use cfgdi_infrastructure::constants::{DEFAULT_LOG_LEVEL, DEFAULT_SERVICES_SECTION};
use serde_json::json;
use validator::Validate;

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert!(!config.logging.json);
    assert_eq!(config.registration.section, DEFAULT_SERVICES_SECTION);
    assert!(config.registration.watch);
    assert!(config.validate().is_ok());
}

#[test]
fn test_pascal_case_keys_with_partial_sections() {
    let config: AppConfig = serde_json::from_value(json!({
        "Logging": {"Level": "debug"},
        "Registration": {"Watch": false}
    }))
    .unwrap();

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.registration.section, DEFAULT_SERVICES_SECTION);
    assert!(!config.registration.watch);
}

#[test]
fn test_invalid_values_fail_validation() {
    let mut config = AppConfig::default();
    config.logging.level = String::from("loud");
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.registration.section = String::new();
    assert!(config.validate().is_err());
}
