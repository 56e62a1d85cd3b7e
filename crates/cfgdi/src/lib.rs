//! # cfgdi
//!
//! Register services and bind their strongly-typed options from a
//! configuration document, with options rebound when the document changes.
//!
//! ## Example
//!
//! ```json
//! {
//!   "Services": [
//!     {
//!       "Service": "Greeter",
//!       "Implementation": "GreetingService",
//!       "Lifetime": "Singleton",
//!       "Options": {
//!         "Implementation": "GreetingServiceOptions",
//!         "Value": { "Name": "Test" }
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! ```ignore
//! let app = cfgdi::application(Some(Path::new("appsettings.json"))).build()?;
//! assert_eq!(app.resolve::<dyn Greeter>()?.greet(), "Hello, Test!");
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Declarations, type descriptors, errors and ports
//! - `application` - Type registry, options binding and the registration engine
//! - `infrastructure` - Configuration sources, watcher, container and logging
//! - [`greeting`] - Demo services registered into the type universe

/// Domain layer - declarations, descriptors, errors and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use cfgdi_domain::*;
}

/// Application layer - type registry, options and registration engine
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use cfgdi_application::*;
}

/// Infrastructure layer - configuration, container, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use cfgdi_infrastructure::*;
}

pub mod greeting;

use std::path::Path;

pub use cfgdi_application::{OptionsMonitor, ServiceRegistrationEngine, list_available_types};
pub use cfgdi_domain::{Error, Lifetime, Result, ServiceResolverExt};
pub use cfgdi_infrastructure::{Application, ApplicationBuilder, ServiceCollection};
pub use greeting::{DefaultGreetingService, Greeter, GreetingService, GreetingServiceOptions};

/// Builder for an application with the demo services registered in code
///
/// Services declared in configuration override the code-registered ones.
pub fn application(config_path: Option<&Path>) -> ApplicationBuilder {
    let builder = ApplicationBuilder::new().configure_services(greeting::register_defaults);
    match config_path {
        Some(path) => builder.with_config_path(path),
        None => builder,
    }
}
