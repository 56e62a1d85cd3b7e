//! Error handling types

use thiserror::Error;

use crate::value_objects::{DeclarationField, FieldFailure, TypeCategory};

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for cfgdi
#[derive(Error, Debug)]
pub enum Error {
    /// A service declaration does not name its implementation type
    #[error("The Implementation type is not specified for Services[{index}]")]
    MissingImplementation {
        /// Position of the declaration in the batch
        index: usize,
    },

    /// A type name does not map to any known type
    #[error("Failed to resolve {expected} type [{name}]: {reason}")]
    TypeResolution {
        /// The name that was looked up
        name: String,
        /// What kind of type the caller needed
        expected: TypeCategory,
        /// Why the lookup failed
        reason: String,
    },

    /// A failure attributed to one field of one declaration
    #[error("Services[{index}].{field}: {source}")]
    Declaration {
        /// Position of the declaration in the batch
        index: usize,
        /// The declaration field that caused the failure
        field: DeclarationField,
        /// The underlying failure
        #[source]
        source: Box<Error>,
    },

    /// An implementation does not provide the contract it is registered under
    #[error("Implementation [{implementation}] does not provide contract [{contract}]")]
    IncompatibleContract {
        /// Implementation type name
        implementation: String,
        /// Contract type name
        contract: String,
    },

    /// A configuration subtree could not be coerced into a settings type
    #[error("Failed to bind {type_name} at '{path}': {reason}")]
    Binding {
        /// Settings type being bound
        type_name: String,
        /// Path of the offending value inside the subtree
        path: String,
        /// Coercion failure description
        reason: String,
    },

    /// A bound settings instance failed its validation rules
    #[error("Options {type_name} failed validation: {}", join_failures(.failures))]
    Validation {
        /// Settings type being validated
        type_name: String,
        /// Every rule that failed
        failures: Vec<FieldFailure>,
    },

    /// No binding exists for the requested service
    #[error("Service not registered: {type_name}")]
    ServiceNotRegistered {
        /// Requested service type
        type_name: String,
    },

    /// A service factory failed
    #[error("Failed to construct {type_name}: {message}")]
    ServiceConstruction {
        /// Service type being constructed
        type_name: String,
        /// Description of the failure
        message: String,
    },

    /// A resolved service did not have the requested type
    #[error("Resolved service is not a {type_name}")]
    ServiceTypeMismatch {
        /// Requested service type
        type_name: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },
}

fn join_failures(failures: &[FieldFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// Registration error creation methods
impl Error {
    /// Create a missing implementation error
    pub fn missing_implementation(index: usize) -> Self {
        Self::MissingImplementation { index }
    }

    /// Create a type resolution error
    pub fn type_resolution<N: Into<String>, R: Into<String>>(
        name: N,
        expected: TypeCategory,
        reason: R,
    ) -> Self {
        Self::TypeResolution {
            name: name.into(),
            expected,
            reason: reason.into(),
        }
    }

    /// Attribute this error to a declaration field
    pub fn in_declaration(self, index: usize, field: DeclarationField) -> Self {
        Self::Declaration {
            index,
            field,
            source: Box::new(self),
        }
    }

    /// Create an incompatible contract error
    pub fn incompatible_contract<I: Into<String>, C: Into<String>>(
        implementation: I,
        contract: C,
    ) -> Self {
        Self::IncompatibleContract {
            implementation: implementation.into(),
            contract: contract.into(),
        }
    }
}

// Options error creation methods
impl Error {
    /// Create a binding error
    pub fn binding<T: Into<String>, P: Into<String>, R: Into<String>>(
        type_name: T,
        path: P,
        reason: R,
    ) -> Self {
        Self::Binding {
            type_name: type_name.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a validation error
    pub fn validation<T: Into<String>>(type_name: T, failures: Vec<FieldFailure>) -> Self {
        Self::Validation {
            type_name: type_name.into(),
            failures,
        }
    }
}

// Container error creation methods
impl Error {
    /// Create a service not registered error
    pub fn service_not_registered<S: Into<String>>(type_name: S) -> Self {
        Self::ServiceNotRegistered {
            type_name: type_name.into(),
        }
    }

    /// Create a service construction error
    pub fn service_construction<T: Into<String>, M: Into<String>>(type_name: T, message: M) -> Self {
        Self::ServiceConstruction {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create a service type mismatch error
    pub fn service_type_mismatch<S: Into<String>>(type_name: S) -> Self {
        Self::ServiceTypeMismatch {
            type_name: type_name.into(),
        }
    }
}

// Configuration and I/O error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Inspection helpers
impl Error {
    /// The innermost error, looking through declaration annotations
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::Declaration { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Index of the declaration this error is attributed to, if any
    pub fn declaration_index(&self) -> Option<usize> {
        match self {
            Self::MissingImplementation { index } | Self::Declaration { index, .. } => {
                Some(*index)
            }
            _ => None,
        }
    }
}
