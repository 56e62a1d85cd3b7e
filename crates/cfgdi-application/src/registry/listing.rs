//! Human-readable listing of the type universe

use std::fmt;

use cfgdi_domain::{TypeCategory, TypeResolver};

use super::LinkedTypeResolver;

/// List every type linked into the binary
pub fn list_available_types() -> AvailableTypes {
    AvailableTypes::from_resolver(&LinkedTypeResolver)
}

/// Names and descriptions of known types, grouped by category
#[derive(Debug, Clone, Default)]
pub struct AvailableTypes {
    /// Contracts (name, description)
    pub contracts: Vec<(&'static str, &'static str)>,
    /// Implementations (name, description)
    pub implementations: Vec<(&'static str, &'static str)>,
    /// Settings types (name, description)
    pub options: Vec<(&'static str, &'static str)>,
}

impl AvailableTypes {
    /// Collect the types a resolver knows
    pub fn from_resolver(resolver: &dyn TypeResolver) -> Self {
        let mut types = Self::default();
        for descriptor in resolver.known_types() {
            let entry = (descriptor.name(), descriptor.description());
            match descriptor.category() {
                TypeCategory::Contract => types.contracts.push(entry),
                TypeCategory::Implementation => types.implementations.push(entry),
                TypeCategory::Options => types.options.push(entry),
            }
        }
        types.contracts.sort_unstable();
        types.implementations.sort_unstable();
        types.options.sort_unstable();
        types
    }

    /// Total number of types
    pub fn len(&self) -> usize {
        self.contracts.len() + self.implementations.len() + self.options.len()
    }

    /// Whether no types are known
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for AvailableTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Available Types:")?;
        writeln!(f)?;

        writeln!(f, "Contracts:")?;
        for (name, desc) in &self.contracts {
            writeln!(f, "  - {name}: {desc}")?;
        }
        writeln!(f)?;

        writeln!(f, "Implementations:")?;
        for (name, desc) in &self.implementations {
            writeln!(f, "  - {name}: {desc}")?;
        }
        writeln!(f)?;

        writeln!(f, "Options:")?;
        for (name, desc) in &self.options {
            writeln!(f, "  - {name}: {desc}")?;
        }

        Ok(())
    }
}
