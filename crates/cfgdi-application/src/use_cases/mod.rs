//! Use Cases
//!
//! Application services orchestrating the registry, the options plumbing
//! and the container ports.

pub mod registration;

pub use registration::{
    RegisteredBinding, RegisteredOptions, RegistrationSummary, ServiceRegistrationEngine,
};
