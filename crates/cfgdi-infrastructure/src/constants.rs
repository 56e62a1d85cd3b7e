//! Infrastructure layer constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "appsettings.json";

/// Alternative configuration file name, in TOML
pub const DEFAULT_TOML_CONFIG_FILENAME: &str = "cfgdi.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "cfgdi";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "CFGDI";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Separator between segments of a configuration path
pub const CONFIG_PATH_SEPARATOR: char = ':';

/// Section holding the service declarations
pub const DEFAULT_SERVICES_SECTION: &str = "Services";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "CFGDI_LOG";

// ============================================================================
// WATCHER CONSTANTS
// ============================================================================

/// Delay before reloading a changed file, to skip partial writes
pub const CONFIG_RELOAD_DEBOUNCE_MS: u64 = 100;

/// Capacity of the watcher event channel
pub const CONFIG_WATCH_EVENT_CAPACITY: usize = 16;
