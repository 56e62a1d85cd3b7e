//! Tests for change subscriptions

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cfgdi_domain::Subscription;

#[test]
fn test_unsubscribe_is_idempotent() {
    let cancelled = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&cancelled);
    let subscription = Subscription::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert!(subscription.is_active());
    subscription.unsubscribe();
    subscription.unsubscribe();
    assert!(!subscription.is_active());
    drop(subscription);

    assert_eq!(cancelled.load(Ordering::SeqCst), 1);
}

#[test]
fn test_drop_unsubscribes() {
    let cancelled = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&cancelled);
    drop(Subscription::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    assert_eq!(cancelled.load(Ordering::SeqCst), 1);
}

#[test]
fn test_inert_subscription() {
    let subscription = Subscription::inert();
    assert!(!subscription.is_active());
    subscription.unsubscribe();
}
