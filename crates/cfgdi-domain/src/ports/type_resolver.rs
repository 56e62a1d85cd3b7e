//! Type Name Resolver Port
//!
//! Turns the type names written in configuration into [`TypeDescriptor`]s.
//! The engine never depends on how the type universe is populated.

use crate::error::{Error, Result};
use crate::value_objects::{TypeCategory, TypeDescriptor};

/// Name → descriptor lookup over a universe of known types
///
/// Implementations must be idempotent: resolving the same name twice
/// yields the same descriptor.
pub trait TypeResolver: Send + Sync {
    /// Find a type by registered name or Rust type path
    fn find(&self, name: &str) -> Option<TypeDescriptor>;

    /// Every type this resolver knows
    fn known_types(&self) -> Vec<TypeDescriptor>;

    /// Resolve a name that must designate a type of category `expected`
    fn resolve(&self, name: &str, expected: TypeCategory) -> Result<TypeDescriptor> {
        let descriptor = self.find(name).ok_or_else(|| {
            Error::type_resolution(name, expected, "no registered type has this name")
        })?;

        if descriptor.category() == expected {
            Ok(descriptor)
        } else {
            Err(Error::type_resolution(
                name,
                expected,
                format!("[{}] is registered as {}", descriptor.name(), descriptor.category()),
            ))
        }
    }
}
