//! Constructor injection for configuration-registered implementations

use std::sync::Arc;

use cfgdi_domain::{ErasedService, Result, ServiceResolver};

/// A service the container can build, resolving its own dependencies
///
/// ```ignore
/// impl Injectable for GreetingService {
///     fn inject(resolver: &dyn ServiceResolver) -> Result<Self> {
///         Ok(Self::new(resolver.resolve::<OptionsMonitor<GreetingServiceOptions>>()?))
///     }
/// }
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Build an instance from services already in the container
    fn inject(resolver: &dyn ServiceResolver) -> Result<Self>;
}

/// Build `T` and erase it, keyed by `T`
pub fn construct<T: Injectable>(resolver: &dyn ServiceResolver) -> Result<ErasedService> {
    T::inject(resolver).map(|instance| ErasedService::new(Arc::new(instance)))
}
