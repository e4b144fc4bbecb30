//! Payload validation engine.
//!
//! [`Validator`] walks a JSON value and a schema together. Each call to the
//! dispatcher handles one (value, schema, path) triple and applies, in order:
//! the nullable shortcut, `enum`, a single combinator (`oneOf`, `anyOf` or
//! `allOf`), and finally the validator for the schema's effective `type`.
//! Object, array and combinator validators recurse back into the dispatcher.
//!
//! Content violations accumulate in an [`ErrorSink`] and never stop sibling
//! checks. Broken schemas surface as [`SchemaError`] and abort the call.
//!
//! # Examples
//!
//! ```rust
//! use openapi_payload_validator::{ComponentTable, ValidationContext, Validator};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let components = ComponentTable::new().with_schema(
//!     "Pet",
//!     json!({
//!         "type": "object",
//!         "required": ["name"],
//!         "properties": {"name": {"type": "string"}}
//!     }),
//! );
//! let validator = Validator::new(&components);
//! let schema = json!({"$ref": "#/components/schemas/Pet"});
//!
//! let mut context = ValidationContext::request();
//! let report = validator.validate(r#"{"name": 7}"#, &schema, "body", &mut context)?;
//! assert!(!report.is_valid());
//! assert_eq!(report.messages(), vec!["body[name]: expected string, got number"]);
//! # Ok(())
//! # }
//! ```

mod array;
pub mod canonical;
mod combinators;
pub mod format;
mod object;
pub mod report;
mod scalar;

pub use report::{ErrorEntry, ErrorSink, ValidationReport};

use crate::config::ValidatorConfig;
use crate::context::ValidationContext;
use crate::error::{SchemaError, SchemaResult, ValidationError};
use crate::schema::{
    Combinator, ComponentTable, ResolvedType, SchemaAccessor, SchemaKind, SchemaScope,
};
use log::{trace, warn};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// Validates JSON payloads against schemas from a [`ComponentTable`].
///
/// A validator holds no per-call state; one instance can serve many calls,
/// including concurrent ones, each with its own [`ValidationContext`].
#[derive(Debug)]
pub struct Validator<'c> {
    accessor: SchemaAccessor<'c>,
    config: ValidatorConfig,
    patterns: Mutex<HashMap<String, Regex>>,
}

impl<'c> Validator<'c> {
    /// Create a validator with the default configuration.
    pub fn new(components: &'c ComponentTable) -> Self {
        Self::with_config(components, ValidatorConfig::default())
    }

    pub fn with_config(components: &'c ComponentTable, config: ValidatorConfig) -> Self {
        Self {
            accessor: SchemaAccessor::new(components, config.max_reference_hops),
            config,
            patterns: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn accessor(&self) -> SchemaAccessor<'c> {
        self.accessor
    }

    /// Decode `raw` and validate it against `schema`.
    ///
    /// A document that fails to decode yields an invalid report with a single
    /// decode error. `Err` is returned only for schema faults such as a
    /// dangling `$ref`.
    pub fn validate(
        &self,
        raw: &str,
        schema: &Value,
        root_path: &str,
        context: &mut ValidationContext,
    ) -> SchemaResult<ValidationReport> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                let mut errors = ErrorSink::new();
                errors.push(ValidationError::Decode {
                    path: root_path.to_string(),
                    details: e.to_string(),
                });
                return Ok(ValidationReport {
                    valid: false,
                    errors,
                });
            }
        };

        self.validate_value(&value, schema, root_path, context)
    }

    /// Validate an already decoded value against `schema`.
    pub fn validate_value(
        &self,
        value: &Value,
        schema: &Value,
        root_path: &str,
        context: &mut ValidationContext,
    ) -> SchemaResult<ValidationReport> {
        let mut errors = ErrorSink::new();
        let scope = SchemaScope::root(schema);
        let valid = self.dispatch(value, &scope, root_path, &mut errors, context, 0)?;

        trace!(
            "{}: validation finished, valid={}, {} error(s)",
            root_path,
            valid,
            errors.len()
        );
        Ok(ValidationReport { valid, errors })
    }

    /// Validate one value against one schema scope.
    pub(crate) fn dispatch(
        &self,
        value: &Value,
        scope: &SchemaScope<'_>,
        path: &str,
        errors: &mut ErrorSink,
        context: &mut ValidationContext,
        depth: usize,
    ) -> SchemaResult<bool> {
        if depth > self.config.max_depth {
            return Err(SchemaError::DepthExceeded {
                path: path.to_string(),
                limit: self.config.max_depth,
            });
        }

        let enum_values = self.accessor.get(scope, "enum")?;

        if value.is_null() && enum_values.is_none() && self.accessor.get_bool(scope, "nullable")? {
            return Ok(true);
        }

        // `enum` ignores `type` entirely.
        if let Some(members) = enum_values {
            let matched = match members {
                Value::Array(members) => members
                    .iter()
                    .any(|member| canonical::values_equal(member, value)),
                single => canonical::values_equal(single, value),
            };
            if !matched {
                errors.push(ValidationError::EnumMismatch {
                    path: path.to_string(),
                    value: value.to_string(),
                });
            }
            return Ok(matched);
        }

        let mut declared = Vec::new();
        for combinator in Combinator::ALL {
            if let Some(subschemas) = self.accessor.get(scope, combinator.keyword())? {
                declared.push((combinator, subschemas));
            }
        }
        match declared.as_slice() {
            [] => {}
            [(combinator, subschemas)] => {
                trace!("{}: evaluating {}", path, combinator);
                return self.evaluate_combinator(
                    value,
                    scope,
                    *combinator,
                    subschemas,
                    path,
                    errors,
                    context,
                    depth,
                );
            }
            _ => {
                warn!("{}: schema declares more than one combinator", path);
                errors.push(ValidationError::ConflictingCombinators {
                    path: path.to_string(),
                });
                return Ok(false);
            }
        }

        match self.accessor.resolved_type(scope)? {
            ResolvedType::Kind(kind) => {
                trace!("{}: validating as {}", path, kind);
                match kind {
                    SchemaKind::Object => {
                        self.validate_object(value, scope, path, errors, context, depth)
                    }
                    SchemaKind::Array => {
                        self.validate_array(value, scope, path, errors, context, depth)
                    }
                    SchemaKind::String => self.validate_string(value, scope, path, errors, context),
                    SchemaKind::Number => self.validate_number(value, scope, path, errors),
                    SchemaKind::Integer => self.validate_integer(value, scope, path, errors),
                    SchemaKind::Boolean => Ok(self.validate_boolean(value, path, errors)),
                    SchemaKind::Null => Ok(self.validate_null(value, path, errors)),
                }
            }
            ResolvedType::Unsupported(type_name) => {
                warn!("{}: unsupported schema type '{}'", path, type_name);
                errors.push(ValidationError::UnsupportedType {
                    path: path.to_string(),
                    type_name,
                });
                Ok(false)
            }
            ResolvedType::Undetermined => {
                warn!("{}: schema has no type and no combinator", path);
                errors.push(ValidationError::UndeterminedType {
                    path: path.to_string(),
                });
                Ok(false)
            }
        }
    }

    /// Compiled regex for `pattern`, cached across calls.
    pub(crate) fn compile_pattern(&self, pattern: &str) -> Result<Regex, regex::Error> {
        let mut cache = self
            .patterns
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(regex) = cache.get(pattern) {
            return Ok(regex.clone());
        }
        let regex = Regex::new(pattern)?;
        cache.insert(pattern.to_string(), regex.clone());
        Ok(regex)
    }
}

/// Name of a value's JSON type for error messages.
pub(crate) fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
