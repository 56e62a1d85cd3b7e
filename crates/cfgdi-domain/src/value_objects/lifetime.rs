//! Service lifetimes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How long a resolved instance is reused by the container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Lifetime {
    /// One instance for the whole process
    #[default]
    #[serde(alias = "singleton")]
    Singleton,
    /// One instance per scope
    #[serde(alias = "scoped")]
    Scoped,
    /// A new instance for every resolution
    #[serde(alias = "transient")]
    Transient,
}

impl Lifetime {
    /// Lifetime name as written in configuration
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Singleton => "Singleton",
            Self::Scoped => "Scoped",
            Self::Transient => "Transient",
        }
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lifetime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "singleton" => Ok(Self::Singleton),
            "scoped" => Ok(Self::Scoped),
            "transient" => Ok(Self::Transient),
            other => Err(Error::configuration(format!(
                "Invalid lifetime: {other}. Use Singleton, Scoped, or Transient"
            ))),
        }
    }
}
