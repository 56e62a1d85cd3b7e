//! Structured logging with tracing
//!
//! Configures the global `tracing` subscriber from [`LoggingConfig`], with
//! the filter overridable through the `CFGDI_LOG` environment variable.

use std::path::Path;

use cfgdi_application::RegistrationSummary;
use cfgdi_domain::error::{Error, Result};
use tracing::{Level, debug, info, warn};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use crate::config::LoggingConfig;
use crate::constants::LOG_FILTER_ENV;

/// Initialize logging with the provided configuration
///
/// Fails if the level is invalid or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));

    // The layer types differ, so each format gets its own branch
    let initialized = if config.json {
        let stdout = fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true);
        Registry::default().with(filter).with(stdout).try_init()
    } else {
        let stdout = fmt::layer()
            .with_target(true)
            .with_thread_names(true);
        Registry::default().with(filter).with(stdout).try_init()
    };
    initialized.map_err(|e| Error::configuration_with_source("Failed to initialize logging", e))?;

    info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log whether the configuration file was found
pub fn log_config_loaded(config_path: &Path, found: bool) {
    if found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        warn!(path = %config_path.display(), "Configuration file not found, using defaults");
    }
}

/// Log what the configuration registered, one event per entry
pub fn log_registration_summary(summary: &RegistrationSummary) {
    for binding in &summary.bindings {
        debug!(
            index = binding.index,
            contract = %binding.contract,
            implementation = %binding.implementation,
            lifetime = %binding.lifetime,
            "Configured service"
        );
    }
    for options in &summary.options {
        debug!(
            index = options.index,
            options = %options.settings,
            path = %options.path,
            "Configured options"
        );
    }
}
