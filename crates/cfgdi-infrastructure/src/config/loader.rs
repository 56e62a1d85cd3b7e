//! Configuration loader
//!
//! Merges configuration from default values, a JSON or TOML file and
//! environment variables into a single document.

use std::env;
use std::path::{Path, PathBuf};

use cfgdi_domain::error::Result;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml};
use serde_json::Value;
use validator::Validate;

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
    DEFAULT_TOML_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;

/// Result of a configuration load
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The merged document the services are declared in
    pub document: Value,
    /// Host settings extracted from the document
    pub app: AppConfig,
    /// File the document was read from, if any
    pub source: Option<PathBuf>,
}

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,

    /// Values merged over the file, below the environment
    overrides: Option<Value>,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
            overrides: None,
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Merge an in-memory document over the file
    pub fn with_overrides(mut self, overrides: Value) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. JSON or TOML configuration file (if exists)
    /// 3. In-memory overrides
    /// 4. Environment variables with prefix (e.g., `CFGDI_Logging__Level`)
    pub fn load(&self) -> Result<LoadedConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        let source = match &self.config_path {
            Some(config_path) if config_path.exists() => {
                log_config_loaded(config_path, true);
                Some(config_path.clone())
            }
            Some(config_path) => {
                log_config_loaded(config_path, false);
                None
            }
            None => Self::find_default_config_path().inspect(|path| log_config_loaded(path, true)),
        };
        if let Some(path) = &source {
            figment = Self::merge_file(figment, path);
        }

        if let Some(overrides) = &self.overrides {
            figment = figment.merge(Serialized::defaults(overrides));
        }

        // Double underscore separates nested keys (e.g., CFGDI_Logging__Level)
        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix))
                .split(CONFIG_ENV_SEPARATOR)
                .lowercase(false),
        );

        let document: Value = figment
            .extract()
            .config_context("Failed to extract configuration")?;
        let app: AppConfig = figment
            .extract()
            .config_context("Failed to extract application settings")?;
        app.validate()
            .config_context("Invalid application settings")?;

        Ok(LoadedConfig {
            document,
            app,
            source,
        })
    }

    /// Reload configuration (useful for hot-reloading)
    pub fn reload(&self) -> Result<LoadedConfig> {
        self.load()
    }

    /// Get the configured file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    fn merge_file(figment: Figment, path: &Path) -> Figment {
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            figment.merge(Toml::file(path))
        } else {
            figment.merge(Json::file(path))
        }
    }

    /// Find the first default configuration file that exists
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let mut candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir.join(DEFAULT_TOML_CONFIG_FILENAME),
        ];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME));
            candidates.push(
                config_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_TOML_CONFIG_FILENAME),
            );
        }

        candidates.into_iter().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
