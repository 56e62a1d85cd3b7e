//! Dependency Injection
//!
//! A reference service container implementing the registry and resolver
//! ports, and the bootstrap that fills it from configuration.
//!
//! ```text
//! ApplicationBuilder
//!   ├─ ConfigLoader ─▶ ConfigRoot ─▶ read_declarations
//!   ├─ ServiceRegistrationEngine::register(declarations, &mut ServiceCollection)
//!   ├─ ServiceCollection::build() ─▶ ServiceProvider ─▶ ServiceScope
//!   └─ ConfigWatcher (optional)
//! ```

pub mod bootstrap;
pub mod container;

pub use bootstrap::{Application, ApplicationBuilder};
pub use container::{ServiceCollection, ServiceProvider, ServiceScope};
