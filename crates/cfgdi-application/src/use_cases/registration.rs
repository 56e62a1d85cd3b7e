//! Service Registration Use Case
//!
//! Turns an ordered list of [`ServiceDeclaration`]s into container
//! bindings and options monitors.
//!
//! The whole batch is staged before anything reaches the registry: if any
//! declaration fails, nothing is registered and every staged options
//! monitor is dropped, which unsubscribes it from its subtree.

use std::fmt;
use std::sync::Arc;

use cfgdi_domain::{
    DeclarationField, ErasedService, Error, Lifetime, Result, ServiceBinding, ServiceDeclaration,
    ServiceFactory, ServiceKey, ServiceRegistry, ServiceResolver, SettingsDeclaration, TypeCategory,
    TypeDescriptor, TypeKind, TypeResolver,
};
use tracing::{debug, info, warn};

use crate::registry::LinkedTypeResolver;

/// A binding added to the registry
#[derive(Debug, Clone)]
pub struct RegisteredBinding {
    /// Declaration position
    pub index: usize,
    /// Key the service resolves by
    pub contract: ServiceKey,
    /// Concrete type produced
    pub implementation: ServiceKey,
    /// Instance lifetime
    pub lifetime: Lifetime,
}

/// An options monitor added to the registry
#[derive(Debug, Clone)]
pub struct RegisteredOptions {
    /// Declaration position
    pub index: usize,
    /// Settings type
    pub settings: ServiceKey,
    /// Subtree the settings are bound from
    pub path: String,
}

/// Everything a successful `register` call added
#[derive(Debug, Clone, Default)]
pub struct RegistrationSummary {
    /// Service bindings, in declaration order
    pub bindings: Vec<RegisteredBinding>,
    /// Options monitors, one per settings type
    pub options: Vec<RegisteredOptions>,
}

impl RegistrationSummary {
    /// Whether nothing was registered
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty() && self.options.is_empty()
    }
}

impl fmt::Display for RegistrationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Registered Services:")?;
        for binding in &self.bindings {
            writeln!(
                f,
                "  [{}] {} -> {} ({})",
                binding.index, binding.contract, binding.implementation, binding.lifetime
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Registered Options:")?;
        for options in &self.options {
            writeln!(f, "  [{}] {} <- {}", options.index, options.settings, options.path)?;
        }
        Ok(())
    }
}

/// Registry writes waiting for the whole batch to succeed
enum Staged {
    Binding {
        index: usize,
        binding: ServiceBinding,
    },
    Options {
        index: usize,
        settings: ServiceKey,
        path: String,
        monitor: ErasedService,
    },
}

/// Registers services and their options from declarations
#[derive(Clone)]
pub struct ServiceRegistrationEngine {
    resolver: Arc<dyn TypeResolver>,
}

impl ServiceRegistrationEngine {
    /// Create an engine resolving names through `resolver`
    pub fn new(resolver: Arc<dyn TypeResolver>) -> Self {
        Self { resolver }
    }

    /// Create an engine over the types linked into the binary
    pub fn linked() -> Self {
        Self::new(Arc::new(LinkedTypeResolver))
    }

    /// The type resolver in use
    pub fn resolver(&self) -> &Arc<dyn TypeResolver> {
        &self.resolver
    }

    /// Register every declaration, in order
    ///
    /// All-or-nothing: on error the registry is left untouched.
    pub fn register(
        &self,
        declarations: &[ServiceDeclaration],
        registry: &mut dyn ServiceRegistry,
    ) -> Result<RegistrationSummary> {
        let mut staged = Vec::with_capacity(declarations.len());
        for (index, declaration) in declarations.iter().enumerate() {
            self.stage(index, declaration, &mut staged)?;
        }

        let mut summary = RegistrationSummary::default();
        for entry in staged {
            match entry {
                Staged::Binding { index, binding } => {
                    info!(
                        index,
                        contract = binding.contract.type_name(),
                        implementation = binding.implementation.type_name(),
                        lifetime = %binding.lifetime,
                        "Registered service"
                    );
                    summary.bindings.push(RegisteredBinding {
                        index,
                        contract: binding.contract,
                        implementation: binding.implementation,
                        lifetime: binding.lifetime,
                    });
                    registry.add_binding(binding);
                }
                Staged::Options {
                    index,
                    settings,
                    path,
                    monitor,
                } => {
                    info!(
                        index,
                        options = settings.type_name(),
                        path = %path,
                        "Registered options"
                    );
                    summary.options.push(RegisteredOptions {
                        index,
                        settings,
                        path,
                    });
                    registry.add_singleton_instance(monitor);
                }
            }
        }

        info!(
            services = summary.bindings.len(),
            options = summary.options.len(),
            "Service registration complete"
        );
        Ok(summary)
    }

    fn stage(
        &self,
        index: usize,
        declaration: &ServiceDeclaration,
        staged: &mut Vec<Staged>,
    ) -> Result<()> {
        let implementation_name = declaration
            .implementation()
            .ok_or_else(|| Error::missing_implementation(index))?;
        let implementation = self
            .resolve(implementation_name, TypeCategory::Implementation)
            .map_err(|e| e.in_declaration(index, DeclarationField::Implementation))?;

        let (contract, factory) = match declaration.contract() {
            Some(contract_name) => {
                let contract = self
                    .resolve(contract_name, TypeCategory::Contract)
                    .map_err(|e| e.in_declaration(index, DeclarationField::Contract))?;
                let factory = contract_factory(&implementation, &contract)
                    .map_err(|e| e.in_declaration(index, DeclarationField::Contract))?;
                (contract.key(), factory)
            }
            None => (
                implementation.key(),
                implementation_factory(&implementation)
                    .map_err(|e| e.in_declaration(index, DeclarationField::Implementation))?,
            ),
        };

        staged.push(Staged::Binding {
            index,
            binding: ServiceBinding {
                contract,
                implementation: implementation.key(),
                lifetime: declaration.lifetime,
                factory,
            },
        });

        if let Some(settings) = &declaration.settings {
            self.stage_settings(index, settings, staged)?;
        }
        Ok(())
    }

    fn stage_settings(
        &self,
        index: usize,
        settings: &SettingsDeclaration,
        staged: &mut Vec<Staged>,
    ) -> Result<()> {
        let Some(type_name) = settings.type_name() else {
            debug!(index, settings = ?settings, "No options type declared");
            return Ok(());
        };

        let descriptor = self
            .resolve(type_name, TypeCategory::Options)
            .map_err(|e| e.in_declaration(index, DeclarationField::SettingsType))?;
        let TypeKind::Options { install } = descriptor.kind() else {
            return Err(Error::type_resolution(
                type_name,
                TypeCategory::Options,
                "not a settings type",
            )
            .in_declaration(index, DeclarationField::SettingsType));
        };

        let Some(subtree) = settings.existing_subtree() else {
            debug!(index, options = descriptor.name(), "No options value to bind");
            return Ok(());
        };

        let monitor = install(Arc::clone(subtree))
            .map_err(|e| e.in_declaration(index, DeclarationField::SettingsValue))?;

        let settings_key = descriptor.key();
        if let Some(position) = staged.iter().position(
            |entry| matches!(entry, Staged::Options { settings, .. } if *settings == settings_key),
        ) {
            warn!(
                index,
                options = descriptor.name(),
                "Options type declared more than once, the last declaration wins"
            );
            staged.remove(position);
        }

        staged.push(Staged::Options {
            index,
            settings: settings_key,
            path: subtree.path().to_string(),
            monitor,
        });
        Ok(())
    }

    fn resolve(&self, name: &str, expected: TypeCategory) -> Result<TypeDescriptor> {
        self.resolver.resolve(name, expected)
    }
}

impl fmt::Debug for ServiceRegistrationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistrationEngine")
            .field("known_types", &self.resolver.known_types().len())
            .finish()
    }
}

fn implementation_factory(implementation: &TypeDescriptor) -> Result<ServiceFactory> {
    let TypeKind::Implementation { construct, .. } = implementation.kind() else {
        return Err(Error::type_resolution(
            implementation.name(),
            TypeCategory::Implementation,
            "not constructible",
        ));
    };
    Ok(Arc::new(construct))
}

fn contract_factory(
    implementation: &TypeDescriptor,
    contract: &TypeDescriptor,
) -> Result<ServiceFactory> {
    let construct = implementation_factory(implementation)?;
    let contract_key = contract.key();
    let cast = implementation
        .cast_to(contract_key)
        .ok_or_else(|| Error::incompatible_contract(implementation.name(), contract.name()))?;

    Ok(Arc::new(move |resolver: &dyn ServiceResolver| {
        let instance = construct(resolver)?;
        cast(instance).ok_or_else(|| Error::service_type_mismatch(contract_key.type_name()))
    }))
}
