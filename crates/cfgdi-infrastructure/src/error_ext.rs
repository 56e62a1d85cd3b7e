//! Error context helpers
//!
//! Converts errors from figment, notify, serde and the filesystem into the
//! domain [`Error`], prefixing a description of what was being done.

use std::fmt;

use cfgdi_domain::error::{Error, Result};

/// Extension trait for adding context to foreign errors
///
/// ```ignore
/// use cfgdi_infrastructure::error_ext::ErrorContext;
///
/// let app: AppConfig = figment
///     .extract()
///     .config_context("Failed to extract application settings")?;
///
/// watcher
///     .watch(dir, RecursiveMode::NonRecursive)
///     .io_context("Failed to watch configuration file")?;
/// ```
pub trait ErrorContext<T>: Sized {
    /// Wrap the error as a configuration error
    fn context<C: fmt::Display>(self, context: C) -> Result<T>;

    /// Like [`context`](Self::context), building the message only on failure
    fn with_context<C: fmt::Display, F: FnOnce() -> C>(self, f: F) -> Result<T>;

    /// Wrap the error as an I/O error
    fn io_context<C: fmt::Display>(self, context: C) -> Result<T>;

    /// Wrap the error as a configuration error
    fn config_context<C: fmt::Display>(self, context: C) -> Result<T> {
        self.context(context)
    }
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C: fmt::Display>(self, context: C) -> Result<T> {
        self.map_err(|err| Error::configuration_with_source(format!("{context}: {err}"), err))
    }

    fn with_context<C: fmt::Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|err| Error::configuration_with_source(format!("{}: {err}", f()), err))
    }

    fn io_context<C: fmt::Display>(self, context: C) -> Result<T> {
        self.map_err(|err| Error::io_with_source(format!("{context}: {err}"), err))
    }
}
