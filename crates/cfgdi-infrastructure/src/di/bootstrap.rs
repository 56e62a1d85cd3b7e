//! Application bootstrap
//!
//! Loads configuration, registers the declared services next to any
//! code-registered ones and builds the provider.
//!
//! ```ignore
//! let app = ApplicationBuilder::new()
//!     .with_config_path("appsettings.json")
//!     .configure_services(|services| {
//!         services.add_singleton::<DefaultGreetingService>();
//!     })
//!     .build()?;
//!
//! let greeter = app.provider().resolve::<dyn Greeter>()?;
//! ```

use std::path::Path;
use std::sync::Arc;

use cfgdi_application::{LinkedTypeResolver, RegistrationSummary, ServiceRegistrationEngine};
use cfgdi_domain::error::Result;
use cfgdi_domain::{ServiceResolverExt, TypeResolver};
use tracing::info;

use crate::config::{
    AppConfig, ConfigLoader, ConfigRoot, ConfigWatcher, LoadedConfig, read_declarations,
};
use crate::di::{ServiceCollection, ServiceProvider};
use crate::logging::log_registration_summary;

/// Builder for an [`Application`]
pub struct ApplicationBuilder {
    loader: ConfigLoader,
    resolver: Arc<dyn TypeResolver>,
    services: ServiceCollection,
    watch: Option<bool>,
    loaded: Option<LoadedConfig>,
}

impl ApplicationBuilder {
    /// Create a builder using the default loader and the linked types
    pub fn new() -> Self {
        Self {
            loader: ConfigLoader::new(),
            resolver: Arc::new(LinkedTypeResolver),
            services: ServiceCollection::new(),
            watch: None,
            loaded: None,
        }
    }

    /// Load configuration from `path`
    #[must_use]
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.loader = self.loader.with_config_path(path);
        self
    }

    /// Use a custom configuration loader
    #[must_use]
    pub fn with_loader(mut self, loader: ConfigLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Build from configuration the loader already produced
    ///
    /// The loader is still used for later reloads.
    #[must_use]
    pub fn with_loaded_config(mut self, loaded: LoadedConfig) -> Self {
        self.loaded = Some(loaded);
        self
    }

    /// Resolve configured type names through `resolver`
    #[must_use]
    pub fn with_type_resolver(mut self, resolver: Arc<dyn TypeResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Register services in code, before the configured ones
    #[must_use]
    pub fn configure_services<F: FnOnce(&mut ServiceCollection)>(mut self, configure: F) -> Self {
        configure(&mut self.services);
        self
    }

    /// Override the `Registration.Watch` setting
    #[must_use]
    pub fn with_watch(mut self, watch: bool) -> Self {
        self.watch = Some(watch);
        self
    }

    /// Load, register and build
    ///
    /// Watching requires a Tokio runtime and a configuration file.
    pub fn build(self) -> Result<Application> {
        let Self {
            loader,
            resolver,
            mut services,
            watch,
            loaded,
        } = self;

        let loaded = match loaded {
            Some(loaded) => loaded,
            None => loader.load()?,
        };
        let root = ConfigRoot::new(loaded.document);
        let section = loaded.app.registration.section.clone();

        let declarations = read_declarations(&root, &section)?;
        let engine = ServiceRegistrationEngine::new(resolver);
        let summary = engine.register(&declarations, &mut services)?;
        let provider = services.build();
        log_registration_summary(&summary);

        let watcher = match (watch.unwrap_or(loaded.app.registration.watch), loaded.source) {
            (true, Some(path)) => Some(ConfigWatcher::new(path, loader.clone(), Arc::clone(&root))?),
            _ => None,
        };

        info!(
            services = summary.bindings.len(),
            options = summary.options.len(),
            watching = watcher.is_some(),
            "Application built"
        );
        Ok(Application {
            config: loaded.app,
            loader,
            root,
            provider,
            summary,
            watcher,
        })
    }
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A built application: configuration, container and watcher
pub struct Application {
    config: AppConfig,
    loader: ConfigLoader,
    root: Arc<ConfigRoot>,
    provider: ServiceProvider,
    summary: RegistrationSummary,
    watcher: Option<ConfigWatcher>,
}

impl Application {
    /// Host settings
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Live configuration tree
    pub fn root(&self) -> &Arc<ConfigRoot> {
        &self.root
    }

    /// Root service provider
    pub fn provider(&self) -> &ServiceProvider {
        &self.provider
    }

    /// What the configuration registered
    pub fn summary(&self) -> &RegistrationSummary {
        &self.summary
    }

    /// File watcher, when watching
    pub fn watcher(&self) -> Option<&ConfigWatcher> {
        self.watcher.as_ref()
    }

    /// Resolve a service from the root provider
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        self.provider.resolve::<T>()
    }

    /// Reload configuration now, returning the number of subscribers notified
    pub fn reload(&self) -> Result<usize> {
        let loaded = self.loader.load()?;
        Ok(self.root.replace(loaded.document))
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("config", &self.config)
            .field("provider", &self.provider)
            .field("watching", &self.watcher.is_some())
            .finish_non_exhaustive()
    }
}
