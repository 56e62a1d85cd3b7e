//! Domain Port Interfaces
//!
//! Boundary contracts between the registration engine and its external
//! collaborators.
//!
//! ## Organization
//!
//! - **config** - Configuration subtrees and change notification
//! - **registry** - Service container write and read sides
//! - **type_resolver** - Name-based type lookup

/// Configuration subtrees and change notification
pub mod config;
/// Service container ports
pub mod registry;
/// Name-based type lookup
pub mod type_resolver;

pub use config::{ChangeCallback, ConfigNode, Subscription};
pub use registry::{
    ServiceBinding, ServiceFactory, ServiceRegistry, ServiceResolver, ServiceResolverExt,
};
pub use type_resolver::TypeResolver;
