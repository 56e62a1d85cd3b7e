//! Settings binder
//!
//! Builds a fresh settings instance from the current state of a subtree.
//! Binding goes through `figment`'s lossy extraction, so string values
//! coerce into numbers and booleans the way environment overrides need.
//! Scalars bound into string fields are read as their text: when a first
//! attempt fails, numbers and booleans are retried as strings.

use cfgdi_domain::{ConfigNode, Error, Result};
use figment::Figment;
use figment::providers::Serialized;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const ROOT_KEY: &str = "value";

/// Structural binder from configuration values to settings types
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsBinder;

impl SettingsBinder {
    /// Bind `T` from the subtree's current value
    ///
    /// A missing or null subtree binds as an empty object, leaving every
    /// field to its serde default.
    pub fn bind<T: DeserializeOwned>(subtree: &dyn ConfigNode) -> Result<T> {
        let value = subtree
            .value()
            .filter(|value| !value.is_null())
            .unwrap_or_else(|| Value::Object(Map::new()));
        Self::bind_value(&value)
    }

    /// Bind `T` from a configuration value
    pub fn bind_value<T: DeserializeOwned>(value: &Value) -> Result<T> {
        extract(value).or_else(|error| {
            let textual = scalars_as_text(value);
            if textual == *value {
                return Err(binding_error::<T>(&error));
            }
            extract(&textual).map_err(|_| binding_error::<T>(&error))
        })
    }
}

fn extract<T: DeserializeOwned>(value: &Value) -> std::result::Result<T, figment::Error> {
    Figment::from(Serialized::default(ROOT_KEY, value)).extract_inner_lossy::<T>(ROOT_KEY)
}

/// Copy of `value` with every number and boolean replaced by its text
fn scalars_as_text(value: &Value) -> Value {
    match value {
        Value::Number(number) => Value::String(number.to_string()),
        Value::Bool(flag) => Value::String(flag.to_string()),
        Value::Array(items) => Value::Array(items.iter().map(scalars_as_text).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), scalars_as_text(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}

// Figment reports the extraction root as the last path segment
fn binding_error<T>(error: &figment::Error) -> Error {
    let segments = match error.path.split_last() {
        Some((last, rest)) if last == ROOT_KEY => rest,
        _ => error.path.as_slice(),
    };
    Error::binding(
        std::any::type_name::<T>(),
        segments.join("."),
        error.kind.to_string(),
    )
}
