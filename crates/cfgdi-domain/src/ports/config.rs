//! Configuration Tree Port
//!
//! Defines the contract for reading configuration subtrees and being told
//! when they change.
//!
//! ## Change notification contract
//!
//! | Property | Guarantee |
//! |----------|-----------|
//! | Payload | None; consumers re-read [`ConfigNode::value`] |
//! | Frequency | Zero or more times, for the lifetime of the subtree |
//! | Thread | Any; usually the configuration source's watcher thread |
//! | Ordering | Unspecified across subscribers |
//! | Unsubscribe | Idempotent; also performed when the [`Subscription`] drops |

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

/// Callback invoked when a subtree may have changed
pub type ChangeCallback = Arc<dyn Fn() + Send + Sync>;

/// A subtree of the configuration document
pub trait ConfigNode: Send + Sync {
    /// Path of the subtree from the document root, e.g. `Services:0:Options:Value`
    fn path(&self) -> &str;

    /// Whether the subtree is present (and not null) in the current document
    fn exists(&self) -> bool;

    /// Snapshot of the subtree in the current document
    fn value(&self) -> Option<Value>;

    /// Register a callback fired whenever the subtree's content changes
    fn on_change(&self, callback: ChangeCallback) -> Subscription;
}

/// Handle to a change callback registration
///
/// Dropping the handle unsubscribes.
pub struct Subscription {
    cancel: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl Subscription {
    /// Create a subscription that runs `cancel` on the first unsubscribe
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Mutex::new(Some(Box::new(cancel))),
        }
    }

    /// A subscription with nothing to cancel
    pub fn inert() -> Self {
        Self {
            cancel: Mutex::new(None),
        }
    }

    /// Stop future callbacks; calling again has no effect
    pub fn unsubscribe(&self) {
        let cancel = self
            .cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    /// Whether callbacks may still fire
    pub fn is_active(&self) -> bool {
        self.cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
