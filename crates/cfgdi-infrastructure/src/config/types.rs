//! Application configuration types
//!
//! Settings of the host itself, read from the same document as the service
//! declarations. Keys are PascalCase to match that document.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_SERVICES_SECTION};
use crate::logging::parse_log_level;

/// Host configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", default)]
pub struct AppConfig {
    /// Logging settings
    #[validate(nested)]
    pub logging: LoggingConfig,
    /// Registration settings
    #[validate(nested)]
    pub registration: RegistrationConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(function = "validate_log_level", message = "Invalid log level"))]
    pub level: String,
    /// Emit JSON lines instead of text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

/// Registration configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", default)]
pub struct RegistrationConfig {
    /// Section holding the service declarations
    #[validate(length(min = 1, message = "Registration section cannot be empty"))]
    pub section: String,
    /// Reload options when the configuration file changes
    pub watch: bool,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            section: DEFAULT_SERVICES_SECTION.to_string(),
            watch: true,
        }
    }
}

fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    parse_log_level(level)
        .map(|_| ())
        .map_err(|_| ValidationError::new("log_level"))
}
