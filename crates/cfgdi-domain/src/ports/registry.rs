//! Service Container Ports
//!
//! The registration engine writes into a [`ServiceRegistry`]; services and
//! options are later read back through a [`ServiceResolver`]. Both are
//! implemented by whatever container the application uses.
//!
//! ## Usage
//!
//! ```ignore
//! use cfgdi_domain::ports::registry::ServiceResolverExt;
//!
//! let greeter = provider.resolve::<dyn Greeter>()?;
//! let options = provider.resolve::<OptionsMonitor<GreetingServiceOptions>>()?;
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::value_objects::{ErasedService, Lifetime, ServiceKey};

/// Factory producing a service instance for a binding
pub type ServiceFactory = Arc<dyn Fn(&dyn ServiceResolver) -> Result<ErasedService> + Send + Sync>;

/// A `contract -> implementation` binding with its lifetime
#[derive(Clone)]
pub struct ServiceBinding {
    /// Key the binding is resolved by
    pub contract: ServiceKey,
    /// Key of the concrete type produced
    pub implementation: ServiceKey,
    /// Instance lifetime
    pub lifetime: Lifetime,
    /// Produces instances keyed by `contract`
    pub factory: ServiceFactory,
}

impl fmt::Debug for ServiceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceBinding")
            .field("contract", &self.contract)
            .field("implementation", &self.implementation)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

/// Write side of the container
///
/// Registration calls are synchronous and non-reentrant. Later bindings for
/// the same contract follow the container's own semantics (usually last wins).
pub trait ServiceRegistry {
    /// Add a lifetime-scoped binding
    fn add_binding(&mut self, binding: ServiceBinding);

    /// Add a ready-made singleton, keyed by its erased type
    fn add_singleton_instance(&mut self, instance: ErasedService);
}

/// Read side of the container
pub trait ServiceResolver: Send + Sync {
    /// Resolve the service registered under `key`
    fn resolve_erased(&self, key: ServiceKey) -> Result<ErasedService>;

    /// Whether anything is registered under `key`
    fn contains(&self, key: ServiceKey) -> bool;
}

/// Typed accessors over any [`ServiceResolver`]
pub trait ServiceResolverExt: ServiceResolver {
    /// Resolve a service as `Arc<T>`
    fn resolve<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        let key = ServiceKey::of::<T>();
        self.resolve_erased(key)?
            .downcast::<T>()
            .ok_or_else(|| Error::service_type_mismatch(key.type_name()))
    }

    /// Resolve a service, or `None` when it is not registered
    fn try_resolve<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Option<Arc<T>>> {
        if self.contains(ServiceKey::of::<T>()) {
            self.resolve::<T>().map(Some)
        } else {
            Ok(None)
        }
    }
}

impl<R: ServiceResolver + ?Sized> ServiceResolverExt for R {}
