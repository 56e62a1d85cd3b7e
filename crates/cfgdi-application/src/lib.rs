//! Application Layer - cfgdi
//!
//! Builds service bindings and their options from declarative service
//! declarations, against the ports defined in `cfgdi-domain`.
//!
//! ## Components
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`registry`] | Type universe: name → [`TypeDescriptor`](cfgdi_domain::TypeDescriptor) |
//! | [`options`] | Settings binder, options validator, options cell and monitor |
//! | [`use_cases`] | The service registration engine |
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `cfgdi-domain`: declarations, descriptors, errors and ports
//! - Pure Rust libraries for binding (`figment`), validation (`validator`)
//!   and lock-free snapshots (`arc-swap`)

pub mod options;
pub mod registry;
pub mod use_cases;

pub use options::{
    OptionsCell, OptionsMonitor, OptionsType, OptionsValidator, RebindOutcome, SettingsBinder,
    install_options,
};
pub use registry::{
    AvailableTypes, Injectable, LinkedTypeResolver, SERVICE_TYPES, TypeCatalog, construct,
    describe_contract, describe_implementation, describe_options, list_available_types,
};
pub use use_cases::{
    RegisteredBinding, RegisteredOptions, RegistrationSummary, ServiceRegistrationEngine,
};

// Used by the `provides!` macro
#[doc(hidden)]
pub use cfgdi_domain as __domain;
