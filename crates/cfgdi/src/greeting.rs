//! Greeting services
//!
//! A small service family for exercising configuration-driven registration.
//! [`GreetingService`] reads its name from [`GreetingServiceOptions`] on
//! every call, so edits to the configuration file show up without a restart.
//! [`DefaultGreetingService`] is registered in code and serves `Greeter`
//! when the configuration declares nothing.

use std::sync::Arc;

use cfgdi_application::{
    Injectable, OptionsMonitor, SERVICE_TYPES, describe_contract, describe_implementation,
    describe_options, provides,
};
use cfgdi_domain::{ContractCast, Lifetime, Result, ServiceResolver, ServiceResolverExt, TypeDescriptor};
use cfgdi_infrastructure::ServiceCollection;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Something that says hello
pub trait Greeter: Send + Sync {
    /// Produce a greeting
    fn greet(&self) -> String;
}

/// Settings of [`GreetingService`]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct GreetingServiceOptions {
    /// Who to greet
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

/// Greets the name configured in [`GreetingServiceOptions`]
pub struct GreetingService {
    options: Arc<OptionsMonitor<GreetingServiceOptions>>,
}

impl GreetingService {
    /// Create a greeting service reading from `options`
    pub fn new(options: Arc<OptionsMonitor<GreetingServiceOptions>>) -> Self {
        Self { options }
    }
}

impl Greeter for GreetingService {
    fn greet(&self) -> String {
        format!("Hello, {}!", self.options.current().name)
    }
}

impl Injectable for GreetingService {
    fn inject(resolver: &dyn ServiceResolver) -> Result<Self> {
        resolver
            .resolve::<OptionsMonitor<GreetingServiceOptions>>()
            .map(Self::new)
    }
}

/// Greets the world
#[derive(Debug, Default)]
pub struct DefaultGreetingService;

impl Greeter for DefaultGreetingService {
    fn greet(&self) -> String {
        String::from("Hello, World!")
    }
}

impl Injectable for DefaultGreetingService {
    fn inject(_: &dyn ServiceResolver) -> Result<Self> {
        Ok(Self)
    }
}

/// Register [`DefaultGreetingService`] as the `Greeter`
pub fn register_defaults(services: &mut ServiceCollection) {
    services
        .add_singleton::<DefaultGreetingService>()
        .add_factory::<dyn Greeter, _>(Lifetime::Singleton, |resolver| {
            let greeter: Arc<dyn Greeter> = resolver.resolve::<DefaultGreetingService>()?;
            Ok(greeter)
        });
}

const GREETING_SERVICE_CONTRACTS: &[ContractCast] = &[provides!(GreetingService => dyn Greeter)];

const DEFAULT_GREETING_SERVICE_CONTRACTS: &[ContractCast] =
    &[provides!(DefaultGreetingService => dyn Greeter)];

#[linkme::distributed_slice(SERVICE_TYPES)]
static GREETER: TypeDescriptor = describe_contract::<dyn Greeter>("Greeter", "Says hello");

#[linkme::distributed_slice(SERVICE_TYPES)]
static GREETING_SERVICE: TypeDescriptor = describe_implementation::<GreetingService>(
    "GreetingService",
    "Greets the name in GreetingServiceOptions",
    GREETING_SERVICE_CONTRACTS,
);

#[linkme::distributed_slice(SERVICE_TYPES)]
static DEFAULT_GREETING_SERVICE: TypeDescriptor = describe_implementation::<DefaultGreetingService>(
    "DefaultGreetingService",
    "Greets the world",
    DEFAULT_GREETING_SERVICE_CONTRACTS,
);

#[linkme::distributed_slice(SERVICE_TYPES)]
static GREETING_SERVICE_OPTIONS: TypeDescriptor =
    describe_options::<GreetingServiceOptions>("GreetingServiceOptions", "Name to greet");
