//! Tests for options binding, validation and live updates

use std::sync::Arc;

use cfgdi_application::{OptionsMonitor, OptionsValidator, SettingsBinder, install_options};
use cfgdi_domain::{ConfigNode, Error, ServiceKey, ValidationResult};
use serde_json::json;

use crate::test_utils::{MessengerOptions, TestNode};

fn attach(node: &Arc<TestNode>) -> OptionsMonitor<MessengerOptions> {
    let subtree: Arc<dyn ConfigNode> = node.clone();
    OptionsMonitor::attach(subtree).expect("options attach")
}

#[test]
fn test_bind_then_rebind_on_change() {
    let node = TestNode::new("Services:0:Options:Value", Some(json!({"Text": "World"})));
    let monitor = attach(&node);
    assert_eq!(monitor.current().text, "World");

    node.set(json!({"Text": "Mars"}));
    assert_eq!(monitor.current().text, "Mars");
}

#[test]
fn test_rebind_leaves_other_monitors_alone() {
    let first = TestNode::new("Services:0:Options:Value", Some(json!({"Text": "World"})));
    let second = TestNode::new("Services:1:Options:Value", Some(json!({"Text": "Moon"})));
    let first_monitor = attach(&first);
    let second_monitor = attach(&second);

    first.set(json!({"Text": "Mars"}));

    assert_eq!(first_monitor.current().text, "Mars");
    assert_eq!(second_monitor.current().text, "Moon");
}

#[test]
fn test_current_is_stable_without_changes() {
    let node = TestNode::new("Opts", Some(json!({"Text": "World"})));
    let monitor = attach(&node);
    assert!(Arc::ptr_eq(&monitor.current(), &monitor.current()));
}

#[test]
fn test_string_values_are_coerced() {
    let node = TestNode::new("Opts", Some(json!({"Text": "hi", "Repeat": "3"})));
    let monitor = attach(&node);
    assert_eq!(monitor.current().repeat, 3);
}

#[test]
fn test_unknown_keys_are_ignored() {
    let node = TestNode::new("Opts", Some(json!({"Text": "hi", "Colour": "blue"})));
    assert_eq!(attach(&node).current().text, "hi");
}

#[test]
fn test_required_field_fails_initial_bind() {
    let node = TestNode::new("Opts", Some(json!({})));
    let subtree: Arc<dyn ConfigNode> = node.clone();
    let err = OptionsMonitor::<MessengerOptions>::attach(subtree).unwrap_err();

    match err {
        Error::Validation { failures, .. } => {
            assert_eq!(failures.len(), 1);
            assert!(failures[0].field.eq_ignore_ascii_case("text"));
            assert_eq!(failures[0].reason, "Text is required");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(node.subscriber_count(), 0);
}

#[test]
fn test_invalid_change_keeps_last_valid_value() {
    let node = TestNode::new("Opts", Some(json!({"Text": "World"})));
    let monitor = attach(&node);

    node.set(json!({}));
    assert_eq!(monitor.current().text, "World");
    assert!(!monitor.last_validation().is_valid());

    node.set(json!({"Text": "World", "Repeat": 9}));
    assert_eq!(monitor.current().repeat, 1);

    node.set(json!({"Text": "Back"}));
    assert_eq!(monitor.current().text, "Back");
    assert!(monitor.last_validation().is_valid());
}

#[test]
fn test_unbindable_change_keeps_last_valid_value() {
    let node = TestNode::new("Opts", Some(json!({"Text": "World"})));
    let monitor = attach(&node);

    node.set(json!({"Text": "World", "Repeat": "often"}));
    assert_eq!(monitor.current().repeat, 1);
}

#[test]
fn test_detach_stops_following_changes() {
    let node = TestNode::new("Opts", Some(json!({"Text": "World"})));
    let monitor = attach(&node);
    assert!(monitor.is_watching());

    monitor.detach();
    monitor.detach();
    node.set(json!({"Text": "Mars"}));

    assert!(!monitor.is_watching());
    assert_eq!(monitor.current().text, "World");
    assert_eq!(node.subscriber_count(), 0);
}

#[test]
fn test_dropping_monitor_unsubscribes() {
    let node = TestNode::new("Opts", Some(json!({"Text": "World"})));
    drop(attach(&node));
    assert_eq!(node.subscriber_count(), 0);
}

#[test]
fn test_install_erases_the_monitor() {
    let node = TestNode::new("Opts", Some(json!({"Text": "World"})));
    let erased = install_options::<MessengerOptions>(node.clone()).unwrap();

    assert_eq!(
        erased.key(),
        ServiceKey::of::<OptionsMonitor<MessengerOptions>>()
    );
    let monitor = erased
        .downcast::<OptionsMonitor<MessengerOptions>>()
        .unwrap();
    assert_eq!(monitor.source_path(), "Opts");
}

#[test]
fn test_validator_reports_every_failure() {
    let options: MessengerOptions =
        SettingsBinder::bind_value(&json!({"Text": "", "Repeat": 0})).unwrap();

    let result = OptionsValidator::validate(&options);
    let fields: Vec<_> = result
        .failures()
        .iter()
        .map(|f| f.field.to_lowercase())
        .collect();
    assert_eq!(fields, ["repeat", "text"]);
    assert!(matches!(result, ValidationResult::Invalid(_)));
}

#[tokio::test]
async fn test_subscribers_observe_rebinds() {
    let node = TestNode::new("Opts", Some(json!({"Text": "World"})));
    let monitor = attach(&node);
    let mut changes = monitor.subscribe();

    node.set(json!({"Text": "Mars"}));

    changes.changed().await.unwrap();
    assert_eq!(changes.borrow_and_update().text, "Mars");
}
