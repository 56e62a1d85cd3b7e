//! Configuration tree tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cfgdi_domain::{ChangeCallback, ConfigNode};
use cfgdi_infrastructure::ConfigRoot;
use serde_json::json;

fn counter() -> (Arc<AtomicUsize>, ChangeCallback) {
    let count = Arc::new(AtomicUsize::new(0));
    let captured = Arc::clone(&count);
    (
        count,
        Arc::new(move || {
            captured.fetch_add(1, Ordering::SeqCst);
        }),
    )
}

#[test]
fn test_section_reads_subtree() {
    let root = ConfigRoot::new(json!({
        "Services": [{"Options": {"Value": {"Name": "World"}}}]
    }));

    let value = root.section("Services:0:Options:Value");
    assert_eq!(value.path(), "Services:0:Options:Value");
    assert!(value.exists());
    assert_eq!(value.value(), Some(json!({"Name": "World"})));
    assert_eq!(value.key(), "Value");

    let nested = root.section("Services:0").section("Options:Value:Name");
    assert_eq!(nested.value(), Some(json!("World")));
    assert_eq!(root.get("services:0:options:value:name"), Some(json!("World")));
}

#[test]
fn test_existence_rules() {
    let root = ConfigRoot::new(json!({"Empty": {}, "Null": null}));

    assert!(root.section("Empty").exists());
    assert!(!root.section("Null").exists());
    assert!(!root.section("Missing").exists());
    assert!(root.section("Missing").value().is_none());
}

#[test]
fn test_children_of_array() {
    let root = ConfigRoot::new(json!({"Services": [{"A": 1}, {"B": 2}]}));
    let children = root.section("Services").children();

    let paths: Vec<_> = children.iter().map(|c| c.path().to_string()).collect();
    assert_eq!(paths, ["Services:0", "Services:1"]);
}

#[test]
fn test_replace_notifies_only_changed_subtrees() {
    let root = ConfigRoot::new(json!({"A": {"X": 1}, "B": {"Y": 1}}));
    let (a_count, a_callback) = counter();
    let (b_count, b_callback) = counter();
    let _a = root.section("A").on_change(a_callback);
    let _b = root.section("B").on_change(b_callback);

    let notified = root.replace(json!({"A": {"X": 2}, "B": {"Y": 1}}));

    assert_eq!(notified, 1);
    assert_eq!(a_count.load(Ordering::SeqCst), 1);
    assert_eq!(b_count.load(Ordering::SeqCst), 0);
    assert_eq!(root.section("A:X").value(), Some(json!(2)));
}

#[test]
fn test_appearing_and_disappearing_subtrees_notify() {
    let root = ConfigRoot::new(json!({}));
    let (count, callback) = counter();
    let _subscription = root.section("A").on_change(callback);

    root.replace(json!({"A": 1}));
    root.replace(json!({}));

    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_unsubscribe_stops_notifications() {
    let root = ConfigRoot::new(json!({"A": 1}));
    let (count, callback) = counter();
    let subscription = root.section("A").on_change(callback);
    assert_eq!(root.subscriber_count(), 1);

    subscription.unsubscribe();
    subscription.unsubscribe();
    root.replace(json!({"A": 2}));

    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert_eq!(root.subscriber_count(), 0);
}

#[test]
fn test_dropping_subscription_unsubscribes() {
    let root = ConfigRoot::new(json!({"A": 1}));
    let (_, callback) = counter();
    drop(root.section("A").on_change(callback));
    assert_eq!(root.subscriber_count(), 0);
}

#[test]
fn test_callback_may_read_the_new_document() {
    let root = ConfigRoot::new(json!({"A": 1}));
    let section = root.section("A");
    let seen = Arc::new(std::sync::Mutex::new(None));

    let reader = section.clone();
    let sink = Arc::clone(&seen);
    let _subscription = section.on_change(Arc::new(move || {
        *sink.lock().unwrap() = reader.value();
    }));
    root.replace(json!({"A": 2}));

    assert_eq!(*seen.lock().unwrap(), Some(json!(2)));
}
