//! Configuration file watcher for hot-reloading
//!
//! Reloads the configuration when its file changes and replaces the
//! [`ConfigRoot`] document, which in turn rebinds every options monitor
//! whose subtree changed.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use cfgdi_domain::error::{Error, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::runtime::Handle;
use tokio::sync::broadcast::{self, Receiver, Sender};
use tracing::{error, info};

use crate::config::{ConfigLoader, ConfigRoot};
use crate::constants::{CONFIG_RELOAD_DEBOUNCE_MS, CONFIG_WATCH_EVENT_CAPACITY};
use crate::error_ext::ErrorContext;

/// Configuration watch event
#[derive(Debug, Clone)]
pub enum ConfigWatchEvent {
    /// Configuration reloaded; `notified` subscribers saw their subtree change
    Reloaded {
        /// Number of change subscribers notified
        notified: usize,
    },
    /// Configuration reload failed; the previous document stays
    ReloadFailed(String),
}

/// Configuration watcher for hot-reloading
pub struct ConfigWatcher {
    config_path: PathBuf,
    loader: ConfigLoader,
    root: Arc<ConfigRoot>,
    event_sender: Sender<ConfigWatchEvent>,
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    /// Start watching `config_path`, reloading through `loader` into `root`
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(
        config_path: PathBuf,
        loader: ConfigLoader,
        root: Arc<ConfigRoot>,
    ) -> Result<Self> {
        let (event_sender, _) = broadcast::channel(CONFIG_WATCH_EVENT_CAPACITY);

        let mut watcher = Self::create_file_watcher(
            config_path.clone(),
            loader.clone(),
            Arc::clone(&root),
            event_sender.clone(),
        )?;

        // Watch the directory so that editors replacing the file are seen
        let watch_target = config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        watcher
            .watch(watch_target, RecursiveMode::NonRecursive)
            .io_context("Failed to watch configuration file")?;

        info!(path = %config_path.display(), "Watching configuration file");
        Ok(Self {
            config_path,
            loader,
            root,
            event_sender,
            _watcher: watcher,
        })
    }

    /// Subscribe to configuration change events
    pub fn subscribe(&self) -> Receiver<ConfigWatchEvent> {
        self.event_sender.subscribe()
    }

    /// Manually trigger a configuration reload
    pub fn reload(&self) -> Result<usize> {
        let loaded = self.loader.load()?;
        let notified = self.root.replace(loaded.document);
        let _ = self
            .event_sender
            .send(ConfigWatchEvent::Reloaded { notified });
        Ok(notified)
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    fn create_file_watcher(
        config_path: PathBuf,
        loader: ConfigLoader,
        root: Arc<ConfigRoot>,
        event_sender: Sender<ConfigWatchEvent>,
    ) -> Result<RecommendedWatcher> {
        // Capture the Tokio runtime handle to use from the notify callback thread
        let runtime_handle = Handle::try_current().map_err(|e| {
            Error::configuration_with_source("Configuration watching requires a Tokio runtime", e)
        })?;

        let watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if Self::should_reload_config(&event, &config_path) => {
                    runtime_handle.spawn(Self::handle_config_change(
                        config_path.clone(),
                        loader.clone(),
                        Arc::clone(&root),
                        event_sender.clone(),
                    ));
                }
                Ok(_) => {}
                Err(e) => {
                    error!(error = %e, "Configuration watch error");
                    let _ = event_sender.send(ConfigWatchEvent::ReloadFailed(format!(
                        "File watch error: {e}"
                    )));
                }
            },
            Config::default(),
        )
        .io_context("Failed to create file watcher")?;

        Ok(watcher)
    }

    /// Check if the file event should trigger a config reload
    fn should_reload_config(event: &Event, config_path: &Path) -> bool {
        let relevant_kind = matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_));
        let file_name = config_path.file_name();
        relevant_kind
            && event
                .paths
                .iter()
                .any(|path| path.file_name() == file_name)
    }

    /// Handle configuration file change
    async fn handle_config_change(
        config_path: PathBuf,
        loader: ConfigLoader,
        root: Arc<ConfigRoot>,
        event_sender: Sender<ConfigWatchEvent>,
    ) {
        // Add a small delay to avoid reading partially written files
        tokio::time::sleep(Duration::from_millis(CONFIG_RELOAD_DEBOUNCE_MS)).await;

        match loader.load() {
            Ok(loaded) => {
                let notified = root.replace(loaded.document);
                info!(
                    path = %config_path.display(),
                    notified,
                    "Configuration reloaded"
                );
                let _ = event_sender.send(ConfigWatchEvent::Reloaded { notified });
            }
            Err(e) => {
                error!(
                    path = %config_path.display(),
                    error = %e,
                    "Failed to reload configuration"
                );
                let _ = event_sender.send(ConfigWatchEvent::ReloadFailed(format!(
                    "Failed to reload configuration: {e}"
                )));
            }
        }
    }
}

impl std::fmt::Debug for ConfigWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigWatcher")
            .field("config_path", &self.config_path)
            .finish_non_exhaustive()
    }
}
