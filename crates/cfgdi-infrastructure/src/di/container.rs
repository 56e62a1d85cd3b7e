//! Service container
//!
//! [`ServiceCollection`] is the write side: bindings and ready-made
//! instances keyed by [`ServiceKey`], last registration wins.
//! [`ServiceProvider`] resolves them:
//!
//! | Lifetime | Cached in | Dependencies resolved from |
//! |----------|-----------|----------------------------|
//! | Singleton | the root provider | the root provider |
//! | Scoped | the resolving scope (the root acts as its own scope) | that scope |
//! | Transient | nowhere | the caller |
//!
//! Dependency cycles are not detected.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use cfgdi_application::Injectable;
use cfgdi_domain::error::{Error, Result};
use cfgdi_domain::{
    ErasedService, Lifetime, ServiceBinding, ServiceKey, ServiceRegistry, ServiceResolver,
};
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use tracing::debug;

type InstanceCache = DashMap<ServiceKey, Arc<OnceCell<ErasedService>>>;

/// Services to build a [`ServiceProvider`] from
#[derive(Default)]
pub struct ServiceCollection {
    bindings: HashMap<ServiceKey, ServiceBinding>,
    instances: HashMap<ServiceKey, ErasedService>,
}

impl ServiceCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under itself as a singleton
    pub fn add_singleton<T: Injectable>(&mut self) -> &mut Self {
        self.add_injectable::<T>(Lifetime::Singleton)
    }

    /// Register `T` under itself, once per scope
    pub fn add_scoped<T: Injectable>(&mut self) -> &mut Self {
        self.add_injectable::<T>(Lifetime::Scoped)
    }

    /// Register `T` under itself, built on every resolution
    pub fn add_transient<T: Injectable>(&mut self) -> &mut Self {
        self.add_injectable::<T>(Lifetime::Transient)
    }

    /// Register `T` under itself with the given lifetime
    pub fn add_injectable<T: Injectable>(&mut self, lifetime: Lifetime) -> &mut Self {
        self.add_factory::<T, _>(lifetime, |resolver| T::inject(resolver).map(Arc::new))
    }

    /// Register a factory producing `T`, which may be a `dyn Trait`
    pub fn add_factory<T, F>(&mut self, lifetime: Lifetime, factory: F) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn ServiceResolver) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        let key = ServiceKey::of::<T>();
        self.add_binding(ServiceBinding {
            contract: key,
            implementation: key,
            lifetime,
            factory: Arc::new(move |resolver: &dyn ServiceResolver| {
                factory(resolver).map(ErasedService::new)
            }),
        });
        self
    }

    /// Register a ready-made instance of `T`
    pub fn add_instance<T: ?Sized + Send + Sync + 'static>(&mut self, instance: Arc<T>) -> &mut Self {
        self.add_singleton_instance(ErasedService::new(instance));
        self
    }

    /// Whether anything is registered under `key`
    pub fn contains(&self, key: ServiceKey) -> bool {
        self.bindings.contains_key(&key) || self.instances.contains_key(&key)
    }

    /// Number of registered services
    pub fn len(&self) -> usize {
        self.bindings.len() + self.instances.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freeze the collection into a provider
    pub fn build(self) -> ServiceProvider {
        debug!(
            bindings = self.bindings.len(),
            instances = self.instances.len(),
            "Building service provider"
        );
        ServiceProvider {
            inner: Arc::new(ProviderInner {
                bindings: self.bindings,
                instances: self.instances,
                singletons: DashMap::new(),
                root_scoped: DashMap::new(),
            }),
        }
    }
}

impl ServiceRegistry for ServiceCollection {
    fn add_binding(&mut self, binding: ServiceBinding) {
        self.instances.remove(&binding.contract);
        self.bindings.insert(binding.contract, binding);
    }

    fn add_singleton_instance(&mut self, instance: ErasedService) {
        self.bindings.remove(&instance.key());
        self.instances.insert(instance.key(), instance);
    }
}

impl fmt::Debug for ServiceCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceCollection")
            .field("bindings", &self.bindings.len())
            .field("instances", &self.instances.len())
            .finish()
    }
}

struct ProviderInner {
    bindings: HashMap<ServiceKey, ServiceBinding>,
    instances: HashMap<ServiceKey, ErasedService>,
    singletons: InstanceCache,
    root_scoped: InstanceCache,
}

/// Root service resolver
#[derive(Clone)]
pub struct ServiceProvider {
    inner: Arc<ProviderInner>,
}

impl ServiceProvider {
    /// Create a scope for scoped services
    pub fn create_scope(&self) -> ServiceScope {
        ServiceScope {
            provider: self.clone(),
            scoped: DashMap::new(),
        }
    }

    fn resolve_with(
        &self,
        key: ServiceKey,
        scoped: &InstanceCache,
        caller: &dyn ServiceResolver,
    ) -> Result<ErasedService> {
        if let Some(instance) = self.inner.instances.get(&key) {
            return Ok(instance.clone());
        }

        let binding = self
            .inner
            .bindings
            .get(&key)
            .ok_or_else(|| Error::service_not_registered(key.type_name()))?;

        match binding.lifetime {
            Lifetime::Singleton => cached(&self.inner.singletons, key, || (binding.factory)(self)),
            Lifetime::Scoped => cached(scoped, key, || (binding.factory)(caller)),
            Lifetime::Transient => (binding.factory)(caller),
        }
    }

    fn contains_key(&self, key: ServiceKey) -> bool {
        self.inner.instances.contains_key(&key) || self.inner.bindings.contains_key(&key)
    }
}

impl ServiceResolver for ServiceProvider {
    fn resolve_erased(&self, key: ServiceKey) -> Result<ErasedService> {
        self.resolve_with(key, &self.inner.root_scoped, self)
    }

    fn contains(&self, key: ServiceKey) -> bool {
        self.contains_key(key)
    }
}

impl fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("bindings", &self.inner.bindings.len())
            .field("instances", &self.inner.instances.len())
            .field("singletons", &self.inner.singletons.len())
            .finish()
    }
}

/// Resolver with its own cache of scoped services
pub struct ServiceScope {
    provider: ServiceProvider,
    scoped: InstanceCache,
}

impl ServiceScope {
    /// The provider this scope belongs to
    pub fn provider(&self) -> &ServiceProvider {
        &self.provider
    }
}

impl ServiceResolver for ServiceScope {
    fn resolve_erased(&self, key: ServiceKey) -> Result<ErasedService> {
        self.provider.resolve_with(key, &self.scoped, self)
    }

    fn contains(&self, key: ServiceKey) -> bool {
        self.provider.contains_key(key)
    }
}

impl fmt::Debug for ServiceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceScope")
            .field("scoped", &self.scoped.len())
            .finish_non_exhaustive()
    }
}

/// Get or build the instance cached under `key`
///
/// The map guard is released before `create` runs so factories can resolve
/// other services from the same cache.
fn cached(
    cache: &InstanceCache,
    key: ServiceKey,
    create: impl FnOnce() -> Result<ErasedService>,
) -> Result<ErasedService> {
    let cell = Arc::clone(cache.entry(key).or_default().value());
    cell.get_or_try_init(create).cloned()
}
