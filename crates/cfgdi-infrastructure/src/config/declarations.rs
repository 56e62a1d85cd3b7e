//! Service declaration reader
//!
//! Reads the configured service list:
//!
//! ```json
//! "Services": [
//!   {
//!     "Service": "Greeter",
//!     "Implementation": "GreetingService",
//!     "Lifetime": "Singleton",
//!     "Options": {
//!       "Implementation": "GreetingServiceOptions",
//!       "Value": { "Name": "World" }
//!     }
//!   }
//! ]
//! ```
//!
//! `Options.Value` is not copied; each declaration keeps a live
//! [`ConfigSection`] pointing at it so the options follow later changes.

use std::sync::Arc;

use cfgdi_domain::error::{Error, Result};
use cfgdi_domain::{ConfigNode, Lifetime, ServiceDeclaration, SettingsDeclaration};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::{ConfigRoot, ConfigSection};
use crate::constants::CONFIG_PATH_SEPARATOR;
use crate::error_ext::ErrorContext;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ServiceItem {
    #[serde(default, alias = "service")]
    service: Option<String>,
    #[serde(default, alias = "implementation")]
    implementation: Option<String>,
    #[serde(default, alias = "lifetime")]
    lifetime: Option<Lifetime>,
    #[serde(default, alias = "options")]
    options: Option<OptionsItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OptionsItem {
    #[serde(default, alias = "implementation")]
    implementation: Option<String>,
}

/// Read the declarations listed under `section`
///
/// A missing section yields no declarations.
pub fn read_declarations(root: &Arc<ConfigRoot>, section: &str) -> Result<Vec<ServiceDeclaration>> {
    let node = root.section(section);
    let Some(value) = node.value().filter(|value| !value.is_null()) else {
        debug!(section, "No service declarations configured");
        return Ok(Vec::new());
    };

    let Value::Array(items) = value else {
        return Err(Error::configuration(format!(
            "Configuration section '{section}' must be a list of services"
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let item: ServiceItem = serde_json::from_value(item)
                .with_context(|| format!("Invalid service declaration at {section}[{index}]"))?;
            Ok(to_declaration(&node.section(&index.to_string()), item))
        })
        .collect()
}

fn to_declaration(item_section: &ConfigSection, item: ServiceItem) -> ServiceDeclaration {
    let settings = item.options.map(|options| SettingsDeclaration {
        settings_type_name: options.implementation,
        config_subtree: Some(options_value(item_section)),
    });

    ServiceDeclaration {
        contract_name: item.service,
        implementation_name: item.implementation,
        lifetime: item.lifetime.unwrap_or_default(),
        settings,
    }
}

fn options_value(item_section: &ConfigSection) -> Arc<dyn ConfigNode> {
    Arc::new(item_section.section(&format!("Options{CONFIG_PATH_SEPARATOR}Value")))
}
