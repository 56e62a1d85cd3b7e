//! Value Objects
//!
//! Immutable data passed between the configuration reader, the
//! registration engine and the container.

pub mod declaration;
pub mod lifetime;
pub mod service;
pub mod type_descriptor;
pub mod validation;

pub use declaration::{DeclarationField, ServiceDeclaration, SettingsDeclaration};
pub use lifetime::Lifetime;
pub use service::{ErasedService, ServiceKey};
pub use type_descriptor::{
    CastFn, ConstructFn, ContractCast, InstallOptionsFn, TypeCategory, TypeDescriptor, TypeKind,
};
pub use validation::{FieldFailure, ValidationResult};
