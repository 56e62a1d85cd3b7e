//! Type resolvers over the linked slice and over explicit catalogs

use cfgdi_domain::{TypeDescriptor, TypeResolver};

use super::SERVICE_TYPES;

/// Resolves names against the types linked into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedTypeResolver;

impl TypeResolver for LinkedTypeResolver {
    fn find(&self, name: &str) -> Option<TypeDescriptor> {
        SERVICE_TYPES.iter().find(|d| d.matches(name)).copied()
    }

    fn known_types(&self) -> Vec<TypeDescriptor> {
        SERVICE_TYPES.to_vec()
    }
}

/// An explicitly populated type universe
///
/// Later registrations shadow earlier ones with the same name.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: Vec<TypeDescriptor>,
}

impl TypeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding every linked type
    pub fn linked() -> Self {
        Self {
            types: SERVICE_TYPES.to_vec(),
        }
    }

    /// Add a type
    pub fn register(&mut self, descriptor: TypeDescriptor) -> &mut Self {
        self.types.push(descriptor);
        self
    }

    /// Add a type, builder style
    #[must_use]
    pub fn with(mut self, descriptor: TypeDescriptor) -> Self {
        self.types.push(descriptor);
        self
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Extend<TypeDescriptor> for TypeCatalog {
    fn extend<I: IntoIterator<Item = TypeDescriptor>>(&mut self, iter: I) {
        self.types.extend(iter);
    }
}

impl FromIterator<TypeDescriptor> for TypeCatalog {
    fn from_iter<I: IntoIterator<Item = TypeDescriptor>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

impl TypeResolver for TypeCatalog {
    fn find(&self, name: &str) -> Option<TypeDescriptor> {
        self.types.iter().rev().find(|d| d.matches(name)).copied()
    }

    fn known_types(&self) -> Vec<TypeDescriptor> {
        self.types.clone()
    }
}
