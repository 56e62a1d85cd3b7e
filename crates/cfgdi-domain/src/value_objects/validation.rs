//! Options validation results

use std::fmt;

/// One failed validation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    /// Path of the offending field, e.g. `Endpoints[1].Url`
    pub field: String,
    /// Human-readable reason
    pub reason: String,
}

impl FieldFailure {
    /// Create a field failure
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Outcome of running a settings type's validation rules
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    /// Every rule passed
    #[default]
    Valid,
    /// At least one rule failed; every failure is listed
    Invalid(Vec<FieldFailure>),
}

impl ValidationResult {
    /// Build a result from a list of failures
    pub fn from_failures(failures: Vec<FieldFailure>) -> Self {
        if failures.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(failures)
        }
    }

    /// Whether every rule passed
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Failures, empty when valid
    pub fn failures(&self) -> &[FieldFailure] {
        match self {
            Self::Valid => &[],
            Self::Invalid(failures) => failures,
        }
    }
}
