//! Service identity and type-erased service handles

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of a service type inside the container
///
/// Works for sized types (`GreetingService`), trait objects
/// (`dyn Greeter`) and generic wrappers (`OptionsMonitor<T>`).
/// Equality and hashing only consider the [`TypeId`].
#[derive(Clone, Copy)]
pub struct ServiceKey {
    type_id: TypeId,
    type_name: &'static str,
}

impl ServiceKey {
    /// Key of the type `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Underlying type id
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Rust type path, e.g. `cfgdi::greeting::GreetingService`
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for ServiceKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ServiceKey").field(&self.type_name).finish()
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// Type-erased, shareable service instance
///
/// Wraps an `Arc<T>` so that trait objects survive erasure: the value
/// stored for `dyn Greeter` is an `Arc<dyn Greeter>` and can only be
/// recovered as such.
#[derive(Clone)]
pub struct ErasedService {
    key: ServiceKey,
    inner: Arc<dyn Any + Send + Sync>,
}

impl ErasedService {
    /// Erase a shared instance, keyed by `T`
    pub fn new<T: ?Sized + Send + Sync + 'static>(instance: Arc<T>) -> Self {
        Self {
            key: ServiceKey::of::<T>(),
            inner: Arc::new(instance),
        }
    }

    /// Key of the erased type
    pub fn key(&self) -> ServiceKey {
        self.key
    }

    /// Recover the instance as `Arc<T>`
    pub fn downcast<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.inner.downcast_ref::<Arc<T>>().cloned()
    }

    /// Whether the erased type is `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.key == ServiceKey::of::<T>()
    }
}

impl fmt::Debug for ErasedService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedService")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
