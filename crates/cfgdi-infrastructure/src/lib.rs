//! # cfgdi Infrastructure Layer
//!
//! Adapters for the ports the registration engine depends on, plus the
//! cross-cutting concerns of an application built on it.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment loader, configuration tree, declaration reader, file watcher |
//! | [`di`] | Reference service container and application bootstrap |
//! | [`logging`] | Tracing subscriber setup |
//! | [`error_ext`] | Context helpers converting foreign errors |
//! | [`constants`] | File names, prefixes and defaults |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

pub use config::{
    AppConfig, ConfigLoader, ConfigRoot, ConfigSection, ConfigWatchEvent, ConfigWatcher,
    LoadedConfig, LoggingConfig, RegistrationConfig, read_declarations,
};
pub use di::{Application, ApplicationBuilder, ServiceCollection, ServiceProvider, ServiceScope};
pub use error_ext::ErrorContext;
