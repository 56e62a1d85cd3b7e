//! Service declarations read from configuration

use std::fmt;
use std::sync::Arc;

use crate::ports::config::ConfigNode;
use crate::value_objects::Lifetime;

/// One entry of the configured service list
#[derive(Clone, Default)]
pub struct ServiceDeclaration {
    /// Contract the service is registered under; absent means the
    /// implementation is registered under itself
    pub contract_name: Option<String>,
    /// Implementation type name (required)
    pub implementation_name: Option<String>,
    /// Instance lifetime
    pub lifetime: Lifetime,
    /// Strongly-typed settings for the implementation
    pub settings: Option<SettingsDeclaration>,
}

impl ServiceDeclaration {
    /// Create a declaration for the given implementation name
    pub fn new(implementation_name: impl Into<String>) -> Self {
        Self {
            implementation_name: Some(implementation_name.into()),
            ..Default::default()
        }
    }

    /// Set the contract name
    pub fn with_contract(mut self, contract_name: impl Into<String>) -> Self {
        self.contract_name = Some(contract_name.into());
        self
    }

    /// Set the lifetime
    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Attach settings
    pub fn with_settings(mut self, settings: SettingsDeclaration) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Contract name, with blank strings treated as absent
    pub fn contract(&self) -> Option<&str> {
        non_blank(self.contract_name.as_deref())
    }

    /// Implementation name, with blank strings treated as absent
    pub fn implementation(&self) -> Option<&str> {
        non_blank(self.implementation_name.as_deref())
    }
}

impl fmt::Debug for ServiceDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDeclaration")
            .field("contract_name", &self.contract_name)
            .field("implementation_name", &self.implementation_name)
            .field("lifetime", &self.lifetime)
            .field("settings", &self.settings)
            .finish()
    }
}

/// Settings attached to a service declaration
#[derive(Clone, Default)]
pub struct SettingsDeclaration {
    /// Settings type name; absent means no strongly-typed settings
    pub settings_type_name: Option<String>,
    /// Subtree the settings are bound from
    pub config_subtree: Option<Arc<dyn ConfigNode>>,
}

impl SettingsDeclaration {
    /// Create a settings declaration
    pub fn new(settings_type_name: impl Into<String>, config_subtree: Arc<dyn ConfigNode>) -> Self {
        Self {
            settings_type_name: Some(settings_type_name.into()),
            config_subtree: Some(config_subtree),
        }
    }

    /// Settings type name, with blank strings treated as absent
    pub fn type_name(&self) -> Option<&str> {
        non_blank(self.settings_type_name.as_deref())
    }

    /// The subtree, only if it exists in the configuration
    pub fn existing_subtree(&self) -> Option<&Arc<dyn ConfigNode>> {
        self.config_subtree.as_ref().filter(|node| node.exists())
    }
}

impl fmt::Debug for SettingsDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsDeclaration")
            .field("settings_type_name", &self.settings_type_name)
            .field(
                "config_subtree",
                &self.config_subtree.as_ref().map(|node| node.path().to_string()),
            )
            .finish()
    }
}

/// Declaration field an error is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationField {
    /// `Service`
    Contract,
    /// `Implementation`
    Implementation,
    /// `Options.Implementation`
    SettingsType,
    /// `Options.Value`
    SettingsValue,
}

impl fmt::Display for DeclarationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Contract => "Service",
            Self::Implementation => "Implementation",
            Self::SettingsType => "Options.Implementation",
            Self::SettingsValue => "Options.Value",
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
