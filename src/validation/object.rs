//! Object validation.
//!
//! Checks run in a fixed order and all of them run, so one pass reports every
//! violation: required properties (with readOnly/writeOnly direction rules),
//! declared properties, `not`, property counts, then `additionalProperties`.

use super::{ErrorSink, Validator, value_type};
use crate::context::{ContextKind, ValidationContext};
use crate::error::{SchemaResult, ValidationError};
use crate::schema::{ResolvedType, SchemaKind, SchemaScope};
use log::debug;
use serde_json::{Map, Value};

impl<'c> Validator<'c> {
    pub(super) fn validate_object(
        &self,
        value: &Value,
        scope: &SchemaScope<'_>,
        path: &str,
        errors: &mut ErrorSink,
        context: &mut ValidationContext,
        depth: usize,
    ) -> SchemaResult<bool> {
        let Some(obj) = value.as_object() else {
            errors.push(ValidationError::invalid_type(path, "object", value_type(value)));
            return Ok(false);
        };

        let mut valid = true;
        let properties = self
            .accessor
            .get(scope, "properties")?
            .and_then(Value::as_object);

        if let Some(required) = self.accessor.get(scope, "required")?.and_then(Value::as_array) {
            for name in required.iter().filter_map(Value::as_str) {
                if !self.check_required(obj, properties, name, path, errors, context)? {
                    valid = false;
                }
            }
        }

        if let Some(properties) = properties {
            for (name, property_value) in obj {
                let Some(property_schema) = properties.get(name) else {
                    continue;
                };
                let child = SchemaScope::root(property_schema);
                let child_path = format!("{}[{}]", path, name);
                if !self.dispatch(property_value, &child, &child_path, errors, context, depth + 1)? {
                    valid = false;
                }
            }
        }

        if let Some(not) = self.accessor.get(scope, "not")? {
            if !self.check_not(obj, not, path, errors, context, depth)? {
                valid = false;
            }
        }

        let count = obj.len();
        if let Some(min) = self.accessor.get_u64(scope, "minProperties")? {
            if (count as u64) < min {
                errors.push(ValidationError::TooFewProperties {
                    path: path.to_string(),
                    count,
                    min,
                });
                valid = false;
            }
        }
        if let Some(max) = self.accessor.get_u64(scope, "maxProperties")? {
            if (count as u64) > max {
                errors.push(ValidationError::TooManyProperties {
                    path: path.to_string(),
                    count,
                    max,
                });
                valid = false;
            }
        }

        match self.accessor.get(scope, "additionalProperties")? {
            Some(Value::Bool(false)) => {
                for name in obj.keys() {
                    if !properties.is_some_and(|p| p.contains_key(name)) {
                        errors.push(ValidationError::AdditionalPropertyNotAllowed {
                            path: path.to_string(),
                            property: name.clone(),
                        });
                        valid = false;
                    }
                }
            }
            // Every property is checked here, declared ones included.
            Some(additional @ Value::Object(_)) => {
                let child = SchemaScope::root(additional);
                for (name, property_value) in obj {
                    let child_path = format!("{}[{}]", path, name);
                    if !self.dispatch(property_value, &child, &child_path, errors, context, depth + 1)? {
                        valid = false;
                    }
                }
            }
            _ => {}
        }

        Ok(valid)
    }

    /// A required property must be present unless the payload direction
    /// excludes it, in which case it must be absent.
    fn check_required(
        &self,
        obj: &Map<String, Value>,
        properties: Option<&Map<String, Value>>,
        name: &str,
        path: &str,
        errors: &mut ErrorSink,
        context: &ValidationContext,
    ) -> SchemaResult<bool> {
        let (read_only, write_only) = match properties.and_then(|p| p.get(name)) {
            Some(property_schema) => {
                let property = SchemaScope::root(property_schema);
                (
                    self.accessor.get_bool(&property, "readOnly")?,
                    self.accessor.get_bool(&property, "writeOnly")?,
                )
            }
            None => (false, false),
        };
        let misplaced = context.forbids(read_only, write_only);

        match (obj.contains_key(name), misplaced) {
            (false, false) => {
                errors.push(ValidationError::missing_required(path, name));
                Ok(false)
            }
            (true, true) => {
                let path = path.to_string();
                let property = name.to_string();
                errors.push(match context.kind() {
                    ContextKind::Request => ValidationError::ReadOnlyInRequest { path, property },
                    ContextKind::Response => {
                        ValidationError::WriteOnlyInResponse { path, property }
                    }
                });
                Ok(false)
            }
            _ => Ok(true),
        }
    }

    /// Enforce `not` for object-shaped subschemas.
    ///
    /// Only `not.required` and `not.properties` are understood; a `not` with a
    /// non-object type is accepted without checks.
    fn check_not(
        &self,
        obj: &Map<String, Value>,
        not: &Value,
        path: &str,
        errors: &mut ErrorSink,
        context: &mut ValidationContext,
        depth: usize,
    ) -> SchemaResult<bool> {
        let not_scope = SchemaScope::root(not);
        match self.accessor.resolved_type(&not_scope)? {
            ResolvedType::Undetermined | ResolvedType::Kind(SchemaKind::Object) => {}
            other => {
                debug!("{}: 'not' with type {:?} is not enforced", path, other);
                return Ok(true);
            }
        }

        let mut valid = true;
        if let Some(required) = self
            .accessor
            .get(&not_scope, "required")?
            .and_then(Value::as_array)
        {
            for name in required.iter().filter_map(Value::as_str) {
                if obj.contains_key(name) {
                    errors.push(ValidationError::ForbiddenProperty {
                        path: path.to_string(),
                        property: name.to_string(),
                    });
                    valid = false;
                }
            }
        }

        if let Some(forbidden) = self
            .accessor
            .get(&not_scope, "properties")?
            .and_then(Value::as_object)
        {
            for (name, forbidden_schema) in forbidden {
                let Some(property_value) = obj.get(name) else {
                    continue;
                };
                let child = SchemaScope::root(forbidden_schema);
                let child_path = format!("{}[{}]", path, name);
                // Errors from this trial run are discarded.
                let mut discarded = ErrorSink::new();
                if self.dispatch(property_value, &child, &child_path, &mut discarded, context, depth + 1)? {
                    errors.push(ValidationError::DisallowedPropertyShape {
                        path: path.to_string(),
                        property: name.clone(),
                    });
                    valid = false;
                }
            }
        }

        Ok(valid)
    }
}
