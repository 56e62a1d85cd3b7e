//! Options cell
//!
//! Concurrency-safe holder of the current settings instance for one
//! settings type. Reads are lock-free snapshots; rebinds are serialized so
//! that racing change notifications never interleave.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use cfgdi_domain::{ConfigNode, Error, FieldFailure, ValidationResult};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::{OptionsType, OptionsValidator, SettingsBinder};

/// What a rebind did to the cell
#[derive(Debug)]
pub enum RebindOutcome {
    /// A new valid value was published
    Published,
    /// The new value bound but failed validation; the old value stays
    Rejected(Vec<FieldFailure>),
    /// The subtree could not be bound; the old value stays
    BindingFailed(Error),
}

impl RebindOutcome {
    /// Whether a new value was published
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published)
    }
}

/// Current bound and validated settings of type `T`
pub struct OptionsCell<T> {
    current: ArcSwap<T>,
    last_validation: ArcSwap<ValidationResult>,
    rebind_lock: Mutex<()>,
    changes: watch::Sender<Arc<T>>,
}

impl<T: OptionsType> OptionsCell<T> {
    /// Create a cell holding an already validated value
    pub(crate) fn new(initial: T) -> Self {
        let initial = Arc::new(initial);
        let (changes, _) = watch::channel(Arc::clone(&initial));
        Self {
            current: ArcSwap::new(initial),
            last_validation: ArcSwap::from_pointee(ValidationResult::Valid),
            rebind_lock: Mutex::new(()),
            changes,
        }
    }

    /// Latest published value
    pub fn current(&self) -> Arc<T> {
        self.current.load_full()
    }

    /// Result of the most recent validation, initial or rebind
    pub fn last_validation(&self) -> Arc<ValidationResult> {
        self.last_validation.load_full()
    }

    /// Observe every published value
    pub fn subscribe(&self) -> watch::Receiver<Arc<T>> {
        self.changes.subscribe()
    }

    /// Atomically replace the current value
    pub(crate) fn publish(&self, value: T) {
        let value = Arc::new(value);
        self.current.store(Arc::clone(&value));
        self.changes.send_replace(value);
    }

    /// Rebuild the value from the subtree and publish it if valid
    pub fn rebind(&self, subtree: &dyn ConfigNode) -> RebindOutcome {
        let _guard = self
            .rebind_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let candidate = match SettingsBinder::bind::<T>(subtree) {
            Ok(candidate) => candidate,
            Err(e) => {
                warn!(
                    path = subtree.path(),
                    options = std::any::type_name::<T>(),
                    error = %e,
                    "Options rebind failed, keeping last valid value"
                );
                return RebindOutcome::BindingFailed(e);
            }
        };

        let result = OptionsValidator::validate(&candidate);
        let outcome = match &result {
            ValidationResult::Valid => {
                self.publish(candidate);
                debug!(
                    path = subtree.path(),
                    options = std::any::type_name::<T>(),
                    "Options rebound"
                );
                RebindOutcome::Published
            }
            ValidationResult::Invalid(failures) => {
                warn!(
                    path = subtree.path(),
                    options = std::any::type_name::<T>(),
                    failures = %Error::validation(std::any::type_name::<T>(), failures.clone()),
                    "Options rebind rejected by validation, keeping last valid value"
                );
                RebindOutcome::Rejected(failures.clone())
            }
        };
        self.last_validation.store(Arc::new(result));
        outcome
    }
}

impl<T> fmt::Debug for OptionsCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsCell")
            .field("type", &std::any::type_name::<T>())
            .field("last_validation", &self.last_validation.load_full())
            .finish_non_exhaustive()
    }
}
