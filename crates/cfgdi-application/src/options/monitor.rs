//! Options monitor
//!
//! The container-facing face of an [`OptionsCell`]. Services depend on
//! `OptionsMonitor<T>` to read the current settings; the monitor keeps the
//! change subscription alive for as long as the container holds it.

use std::fmt;
use std::sync::Arc;

use cfgdi_domain::{ConfigNode, Result, Subscription, ValidationResult};
use tokio::sync::watch;
use tracing::debug;

use super::{OptionsCell, OptionsType, OptionsValidator, SettingsBinder};

/// Live settings of type `T`, resolved from the container
pub struct OptionsMonitor<T> {
    cell: Arc<OptionsCell<T>>,
    subtree: Arc<dyn ConfigNode>,
    subscription: Subscription,
}

impl<T: OptionsType> OptionsMonitor<T> {
    /// Bind and validate `T` at `subtree`, then follow its changes
    pub fn attach(subtree: Arc<dyn ConfigNode>) -> Result<Self> {
        let initial = SettingsBinder::bind::<T>(subtree.as_ref())?;
        OptionsValidator::ensure_valid(&initial)?;

        let cell = Arc::new(OptionsCell::new(initial));
        let weak_cell = Arc::downgrade(&cell);
        let weak_subtree = Arc::downgrade(&subtree);
        let subscription = subtree.on_change(Arc::new(move || {
            if let (Some(cell), Some(subtree)) = (weak_cell.upgrade(), weak_subtree.upgrade()) {
                cell.rebind(subtree.as_ref());
            }
        }));

        debug!(
            path = subtree.path(),
            options = std::any::type_name::<T>(),
            "Options bound"
        );
        Ok(Self {
            cell,
            subtree,
            subscription,
        })
    }

    /// Latest valid settings
    pub fn current(&self) -> Arc<T> {
        self.cell.current()
    }

    /// Result of the most recent validation
    pub fn last_validation(&self) -> Arc<ValidationResult> {
        self.cell.last_validation()
    }

    /// Receive every newly published value
    pub fn subscribe(&self) -> watch::Receiver<Arc<T>> {
        self.cell.subscribe()
    }

    /// Path of the subtree the settings are bound from
    pub fn source_path(&self) -> &str {
        self.subtree.path()
    }

    /// Whether changes to the subtree are still followed
    pub fn is_watching(&self) -> bool {
        self.subscription.is_active()
    }

    /// Stop following changes; the current value stays readable
    pub fn detach(&self) {
        self.subscription.unsubscribe();
    }
}

impl<T> fmt::Debug for OptionsMonitor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsMonitor")
            .field("type", &std::any::type_name::<T>())
            .field("path", &self.subtree.path())
            .field("watching", &self.subscription.is_active())
            .finish()
    }
}
