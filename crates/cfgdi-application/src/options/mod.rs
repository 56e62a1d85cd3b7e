//! Options Binding
//!
//! Strongly-typed settings bound from configuration subtrees and kept in
//! sync with them.
//!
//! ```text
//! subtree ──bind──▶ T ──validate──▶ OptionsCell<T> ◀── OptionsMonitor<T> (container)
//!    │                                   ▲
//!    └──on_change──▶ rebind ─▶ validate ─┘ publish if valid
//! ```

mod binder;
mod cell;
mod monitor;
mod validator;

pub use binder::SettingsBinder;
pub use cell::{OptionsCell, RebindOutcome};
pub use monitor::OptionsMonitor;
pub use validator::OptionsValidator;

use std::sync::Arc;

use cfgdi_domain::{ConfigNode, ErasedService, Result};
use serde::de::DeserializeOwned;
use ::validator::Validate;

/// A type that can be bound from configuration and validated
///
/// Implemented for every `DeserializeOwned + Validate` type; derive
/// `serde::Deserialize` and `validator::Validate` to opt in.
pub trait OptionsType: DeserializeOwned + Validate + Send + Sync + 'static {}

impl<T> OptionsType for T where T: DeserializeOwned + Validate + Send + Sync + 'static {}

/// Bind, validate and watch `T` at `subtree`, returning the erased
/// [`OptionsMonitor<T>`] to register as a singleton
///
/// Fails when the initial value cannot be bound or is invalid.
pub fn install_options<T: OptionsType>(subtree: Arc<dyn ConfigNode>) -> Result<ErasedService> {
    let monitor = OptionsMonitor::<T>::attach(subtree)?;
    Ok(ErasedService::new(Arc::new(monitor)))
}
