//! Options validator
//!
//! Runs a settings type's `validator` rules and flattens the nested error
//! tree into `(field path, reason)` pairs.

use cfgdi_domain::{Error, FieldFailure, Result, ValidationResult};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Key `validator` uses for struct-level (schema) failures
const SCHEMA_KEY: &str = "__all__";

/// Declarative validation over settings instances
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionsValidator;

impl OptionsValidator {
    /// Run every rule, reporting every failure
    pub fn validate<T: Validate>(instance: &T) -> ValidationResult {
        match instance.validate() {
            Ok(()) => ValidationResult::Valid,
            Err(errors) => {
                let mut failures = Vec::new();
                flatten("", &errors, &mut failures);
                failures.sort_by(|a, b| a.field.cmp(&b.field));
                ValidationResult::from_failures(failures)
            }
        }
    }

    /// Run every rule, turning failures into a validation error
    pub fn ensure_valid<T: Validate>(instance: &T) -> Result<()> {
        match Self::validate(instance) {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(failures) => {
                Err(Error::validation(std::any::type_name::<T>(), failures))
            }
        }
    }
}

fn flatten(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldFailure>) {
    for (field, kind) in errors.errors() {
        let field = field.to_string();
        let path = match (prefix.is_empty(), field == SCHEMA_KEY) {
            (true, true) => String::from("$"),
            (false, true) => prefix.to_string(),
            (true, false) => field,
            (false, false) => format!("{prefix}.{field}"),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let reason = error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string);
                    out.push(FieldFailure::new(path.clone(), reason));
                }
            }
            ValidationErrorsKind::Struct(nested) => flatten(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    flatten(&format!("{path}[{index}]"), nested, out);
                }
            }
        }
    }
}
