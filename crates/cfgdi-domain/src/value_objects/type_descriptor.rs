//! Type descriptors
//!
//! A [`TypeDescriptor`] is the handle a type name resolves to. It carries no
//! reflection data, only plain fn pointers monomorphised where the type was
//! registered, so the registration engine can construct services and install
//! options for types it has never seen.
//!
//! ```text
//! "GreetingService"        → Implementation { construct, contracts }
//! "Greeter"                → Contract
//! "GreetingServiceOptions" → Options { install }
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::ports::config::ConfigNode;
use crate::ports::registry::ServiceResolver;
use crate::value_objects::{ErasedService, ServiceKey};

/// Builds an implementation, resolving its dependencies from the container
pub type ConstructFn = fn(&dyn ServiceResolver) -> Result<ErasedService>;

/// Binds, validates and wires a settings type against a subtree, returning
/// the erased options monitor to register
pub type InstallOptionsFn = fn(Arc<dyn ConfigNode>) -> Result<ErasedService>;

/// Converts an erased implementation into an erased contract
pub type CastFn = fn(ErasedService) -> Option<ErasedService>;

/// A contract an implementation can be registered under
#[derive(Clone, Copy)]
pub struct ContractCast {
    /// Key of the contract (usually a `dyn Trait`)
    pub contract: fn() -> ServiceKey,
    /// Upcast from the implementation to the contract
    pub cast: CastFn,
}

/// Broad category of a described type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    /// Abstract role a service is registered under
    Contract,
    /// Concrete service type
    Implementation,
    /// Settings type bound from configuration
    Options,
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Contract => "contract",
            Self::Implementation => "implementation",
            Self::Options => "options",
        })
    }
}

/// Category-specific plumbing of a described type
#[derive(Clone, Copy)]
pub enum TypeKind {
    /// A contract; resolution goes through implementations' casts
    Contract,
    /// A constructible implementation
    Implementation {
        /// Factory
        construct: ConstructFn,
        /// Contracts this implementation provides
        contracts: &'static [ContractCast],
    },
    /// A settings type
    Options {
        /// Per-type options plumbing
        install: InstallOptionsFn,
    },
}

/// Opaque handle to a resolved type
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    name: &'static str,
    description: &'static str,
    key: fn() -> ServiceKey,
    kind: TypeKind,
}

impl TypeDescriptor {
    /// Describe a contract
    pub const fn contract(
        name: &'static str,
        description: &'static str,
        key: fn() -> ServiceKey,
    ) -> Self {
        Self {
            name,
            description,
            key,
            kind: TypeKind::Contract,
        }
    }

    /// Describe an implementation
    pub const fn implementation(
        name: &'static str,
        description: &'static str,
        key: fn() -> ServiceKey,
        construct: ConstructFn,
        contracts: &'static [ContractCast],
    ) -> Self {
        Self {
            name,
            description,
            key,
            kind: TypeKind::Implementation {
                construct,
                contracts,
            },
        }
    }

    /// Describe a settings type
    pub const fn options(
        name: &'static str,
        description: &'static str,
        key: fn() -> ServiceKey,
        install: InstallOptionsFn,
    ) -> Self {
        Self {
            name,
            description,
            key,
            kind: TypeKind::Options { install },
        }
    }

    /// Configuration-facing name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Key of the described type
    pub fn key(&self) -> ServiceKey {
        (self.key)()
    }

    /// Rust type path of the described type
    pub fn type_name(&self) -> &'static str {
        self.key().type_name()
    }

    /// Category-specific plumbing
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Broad category
    pub fn category(&self) -> TypeCategory {
        match self.kind {
            TypeKind::Contract => TypeCategory::Contract,
            TypeKind::Implementation { .. } => TypeCategory::Implementation,
            TypeKind::Options { .. } => TypeCategory::Options,
        }
    }

    /// Whether `name` designates this type, by registered name or type path
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        self.name == name || self.type_name() == name
    }

    /// Find the cast to `contract` among the provided contracts
    pub fn cast_to(&self, contract: ServiceKey) -> Option<CastFn> {
        match self.kind {
            TypeKind::Implementation { contracts, .. } => contracts
                .iter()
                .find(|c| (c.contract)() == contract)
                .map(|c| c.cast),
            _ => None,
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("type_name", &self.type_name())
            .field("category", &self.category())
            .finish()
    }
}
