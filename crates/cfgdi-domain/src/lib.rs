//! # cfgdi Domain Layer
//!
//! Core types for registering services from configuration.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error type and `Result` alias |
//! | [`value_objects`] | Declarations, lifetimes, service keys, type descriptors, validation results |
//! | [`ports`] | Configuration tree, type resolver and container contracts |

pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::*;
pub use value_objects::*;
