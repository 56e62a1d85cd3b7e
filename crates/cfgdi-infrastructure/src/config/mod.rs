//! Configuration
//!
//! ```text
//! defaults ─┐
//! file ─────┼─▶ ConfigLoader ─▶ LoadedConfig { document, app }
//! env ──────┘                        │
//!                                    ▼
//!                  ConfigRoot ─▶ ConfigSection (ConfigNode) ─▶ read_declarations
//!                      ▲
//!        ConfigWatcher ┘ replace on file change
//! ```

mod declarations;
mod loader;
mod tree;
mod types;
mod watcher;

pub use declarations::read_declarations;
pub use loader::{ConfigLoader, LoadedConfig};
pub use tree::{ConfigRoot, ConfigSection};
pub use types::{AppConfig, LoggingConfig, RegistrationConfig};
pub use watcher::{ConfigWatchEvent, ConfigWatcher};
