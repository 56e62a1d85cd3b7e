//! Type Registry
//!
//! The universe of types that configuration may name. Types register
//! themselves at compile time into the [`SERVICE_TYPES`] distributed slice
//! and are looked up by name when declarations are processed.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Type Registration Flow                       │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Crate defines:     #[linkme::distributed_slice(SERVICE_TYPES)]
//! │                        static T: TypeDescriptor = describe_*()  │
//! │                              ↓                                  │
//! │  2. Registry declares: pub static SERVICE_TYPES: [..] = [..]    │
//! │                              ↓                                  │
//! │  3. Resolver queries:  SERVICE_TYPES.iter()                     │
//! │                              ↓                                  │
//! │  4. Config selects:    "Implementation": "GreetingService"      │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use cfgdi_application::registry::{SERVICE_TYPES, describe_implementation};
//!
//! const GREETING_CONTRACTS: &[ContractCast] =
//!     &[cfgdi_application::provides!(GreetingService => dyn Greeter)];
//!
//! #[linkme::distributed_slice(SERVICE_TYPES)]
//! static GREETING_SERVICE: TypeDescriptor = describe_implementation::<GreetingService>(
//!     "GreetingService",
//!     "Greets the configured name",
//!     GREETING_CONTRACTS,
//! );
//! ```

mod catalog;
mod injectable;
mod listing;

pub use catalog::{LinkedTypeResolver, TypeCatalog};
pub use injectable::{Injectable, construct};
pub use listing::{AvailableTypes, list_available_types};

use cfgdi_domain::{ContractCast, ServiceKey, TypeDescriptor};

use crate::options::{OptionsType, install_options};

/// Every type linked into the binary that configuration may name
#[linkme::distributed_slice]
pub static SERVICE_TYPES: [TypeDescriptor] = [..];

/// Describe a contract, usually a `dyn Trait`
pub const fn describe_contract<C: ?Sized + 'static>(
    name: &'static str,
    description: &'static str,
) -> TypeDescriptor {
    TypeDescriptor::contract(name, description, ServiceKey::of::<C>)
}

/// Describe an implementation built through [`Injectable`]
///
/// `contracts` lists every contract the implementation may be registered
/// under; build entries with [`provides!`](crate::provides).
pub const fn describe_implementation<I: Injectable>(
    name: &'static str,
    description: &'static str,
    contracts: &'static [ContractCast],
) -> TypeDescriptor {
    TypeDescriptor::implementation(
        name,
        description,
        ServiceKey::of::<I>,
        construct::<I>,
        contracts,
    )
}

/// Describe a settings type bound from configuration
pub const fn describe_options<T: OptionsType>(
    name: &'static str,
    description: &'static str,
) -> TypeDescriptor {
    TypeDescriptor::options(name, description, ServiceKey::of::<T>, install_options::<T>)
}

/// Build a [`ContractCast`] from an implementation to a contract
///
/// ```ignore
/// provides!(GreetingService => dyn Greeter)
/// ```
#[macro_export]
macro_rules! provides {
    ($implementation:ty => $contract:ty) => {
        $crate::__domain::ContractCast {
            contract: $crate::__domain::ServiceKey::of::<$contract>,
            cast: |service| {
                service
                    .downcast::<$implementation>()
                    .map(|instance| $crate::__domain::ErasedService::new::<$contract>(instance))
            },
        }
    };
}
