//! cfgdi - Entry Point
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `cfgdi greet` | Print the greeting of the configured `Greeter` (default) |
//! | `cfgdi greet --default` | Print the greeting of the code-registered service |
//! | `cfgdi types` | List the types configuration may name |
//! | `cfgdi watch` | Print the greeting again whenever the configuration changes |

use std::path::PathBuf;

use anyhow::{Context, bail};
use cfgdi::infrastructure::logging::{init_logging, log_config_loaded};
use cfgdi::infrastructure::{Application, ConfigLoader, ConfigWatchEvent};
use cfgdi::{DefaultGreetingService, Greeter, list_available_types};
use clap::{Parser, Subcommand};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

/// Command line interface for cfgdi
#[derive(Parser, Debug)]
#[command(name = "cfgdi")]
#[command(about = "Register services and bind their options from configuration")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a greeting
    Greet {
        /// Use the code-registered greeter instead of the configured one
        #[arg(long)]
        default: bool,
    },
    /// List the types configuration may name
    Types,
    /// Greet again on every configuration change, until Ctrl-C
    Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Greet { default: false });

    if let Command::Types = command {
        print!("{}", list_available_types());
        return Ok(());
    }

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let loaded = loader.load().context("Failed to load configuration")?;
    init_logging(&loaded.app.logging)?;
    // Loading ran before a subscriber existed
    match (&loaded.source, &cli.config) {
        (Some(path), _) => log_config_loaded(path, true),
        (None, Some(path)) => log_config_loaded(path, false),
        (None, None) => {}
    }

    let watch = matches!(command, Command::Watch);
    let app = cfgdi::application(None)
        .with_loader(loader)
        .with_loaded_config(loaded)
        .with_watch(watch)
        .build()
        .context("Failed to register services from configuration")?;

    match command {
        Command::Greet { default: true } => {
            println!("{}", app.resolve::<DefaultGreetingService>()?.greet());
        }
        Command::Greet { default: false } => {
            println!("{}", app.resolve::<dyn Greeter>()?.greet());
        }
        Command::Watch => watch_greetings(&app).await?,
        Command::Types => {}
    }
    Ok(())
}

async fn watch_greetings(app: &Application) -> anyhow::Result<()> {
    let Some(watcher) = app.watcher() else {
        bail!("No configuration file to watch; pass --config");
    };
    let greeter = app.resolve::<dyn Greeter>()?;
    let mut events = watcher.subscribe();

    println!("{}", greeter.greet());
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(ConfigWatchEvent::Reloaded { .. }) => println!("{}", greeter.greet()),
                Ok(ConfigWatchEvent::ReloadFailed(reason)) => {
                    warn!(reason = %reason, "Keeping the previous configuration");
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Missed configuration events");
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}
