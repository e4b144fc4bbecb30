//! String, number, integer, boolean and null validation.

use super::format::is_valid_format;
use super::{ErrorSink, Validator, value_type};
use crate::callback;
use crate::context::ValidationContext;
use crate::error::{SchemaResult, ValidationError};
use crate::schema::SchemaScope;
use log::warn;
use serde_json::Value;

impl<'c> Validator<'c> {
    pub(super) fn validate_string(
        &self,
        value: &Value,
        scope: &SchemaScope<'_>,
        path: &str,
        errors: &mut ErrorSink,
        context: &mut ValidationContext,
    ) -> SchemaResult<bool> {
        let Some(text) = value.as_str() else {
            errors.push(ValidationError::invalid_type(path, "string", value_type(value)));
            return Ok(false);
        };
        callback::register(text, path, context);

        let mut valid = true;
        let length = text.chars().count();

        if let Some(min) = self.accessor.get_u64(scope, "minLength")? {
            if (length as u64) < min {
                errors.push(ValidationError::StringTooShort {
                    path: path.to_string(),
                    length,
                    min,
                });
                valid = false;
            }
        }
        if let Some(max) = self.accessor.get_u64(scope, "maxLength")? {
            if (length as u64) > max {
                errors.push(ValidationError::StringTooLong {
                    path: path.to_string(),
                    length,
                    max,
                });
                valid = false;
            }
        }

        if let Some(pattern) = self.accessor.get_str(scope, "pattern")? {
            match self.compile_pattern(pattern) {
                Ok(regex) if regex.is_match(text) => {}
                Ok(_) => {
                    errors.push(ValidationError::PatternMismatch {
                        path: path.to_string(),
                        value: text.to_string(),
                        pattern: pattern.to_string(),
                    });
                    valid = false;
                }
                Err(e) => {
                    warn!("{}: invalid pattern '{}': {}", path, pattern, e);
                    errors.push(ValidationError::InvalidPattern {
                        path: path.to_string(),
                        pattern: pattern.to_string(),
                        details: e.to_string(),
                    });
                    valid = false;
                }
            }
        }

        if self.config.check_formats {
            if let Some(format) = self.accessor.get_str(scope, "format")? {
                if !is_valid_format(format, text) {
                    errors.push(ValidationError::InvalidFormat {
                        path: path.to_string(),
                        format: format.to_string(),
                        value: text.to_string(),
                    });
                    valid = false;
                }
            }
        }

        Ok(valid)
    }

    /// Range and `multipleOf` checks; every violated constraint is reported.
    pub(super) fn validate_number(
        &self,
        value: &Value,
        scope: &SchemaScope<'_>,
        path: &str,
        errors: &mut ErrorSink,
    ) -> SchemaResult<bool> {
        let Some(number) = value.as_f64() else {
            errors.push(ValidationError::invalid_type(path, "number", value_type(value)));
            return Ok(false);
        };

        let mut valid = true;
        let exclusive_minimum = self.accessor.get(scope, "exclusiveMinimum")?;
        let exclusive_maximum = self.accessor.get(scope, "exclusiveMaximum")?;

        if let Some(minimum) = self.accessor.get_f64(scope, "minimum")? {
            let exclusive = exclusive_minimum.and_then(Value::as_bool).unwrap_or(false);
            if exclusive && number <= minimum {
                errors.push(ValidationError::NotAboveExclusiveMinimum {
                    path: path.to_string(),
                    value: number,
                    minimum,
                });
                valid = false;
            } else if !exclusive && number < minimum {
                errors.push(ValidationError::BelowMinimum {
                    path: path.to_string(),
                    value: number,
                    minimum,
                });
                valid = false;
            }
        }
        // OpenAPI 3.1 numeric form
        if let Some(minimum) = exclusive_minimum.and_then(Value::as_f64) {
            if number <= minimum {
                errors.push(ValidationError::NotAboveExclusiveMinimum {
                    path: path.to_string(),
                    value: number,
                    minimum,
                });
                valid = false;
            }
        }

        if let Some(maximum) = self.accessor.get_f64(scope, "maximum")? {
            let exclusive = exclusive_maximum.and_then(Value::as_bool).unwrap_or(false);
            if exclusive && number >= maximum {
                errors.push(ValidationError::NotBelowExclusiveMaximum {
                    path: path.to_string(),
                    value: number,
                    maximum,
                });
                valid = false;
            } else if !exclusive && number > maximum {
                errors.push(ValidationError::AboveMaximum {
                    path: path.to_string(),
                    value: number,
                    maximum,
                });
                valid = false;
            }
        }
        if let Some(maximum) = exclusive_maximum.and_then(Value::as_f64) {
            if number >= maximum {
                errors.push(ValidationError::NotBelowExclusiveMaximum {
                    path: path.to_string(),
                    value: number,
                    maximum,
                });
                valid = false;
            }
        }

        if let Some(divisor) = self.accessor.get_f64(scope, "multipleOf")? {
            if divisor <= 0.0 {
                warn!("{}: ignoring non-positive multipleOf {}", path, divisor);
            } else if !self.is_multiple_of(number, divisor) {
                errors.push(ValidationError::NotMultipleOf {
                    path: path.to_string(),
                    value: number,
                    divisor,
                });
                valid = false;
            }
        }

        Ok(valid)
    }

    fn is_multiple_of(&self, number: f64, divisor: f64) -> bool {
        let epsilon = self.config.multiple_of_epsilon;
        if epsilon == 0.0 {
            return number % divisor == 0.0;
        }
        let quotient = number / divisor;
        if !quotient.is_finite() {
            return false;
        }
        let nearest = quotient.round();
        if nearest == 0.0 {
            return number == 0.0;
        }
        // Tolerance scales with the quotient so only rounding noise passes.
        (quotient - nearest).abs() <= epsilon * quotient.abs().max(1.0)
    }

    pub(super) fn validate_integer(
        &self,
        value: &Value,
        scope: &SchemaScope<'_>,
        path: &str,
        errors: &mut ErrorSink,
    ) -> SchemaResult<bool> {
        if !self.validate_number(value, scope, path, errors)? {
            errors.push(ValidationError::IntegerConstraints {
                path: path.to_string(),
            });
            return Ok(false);
        }

        match value.as_f64() {
            Some(number) if number.floor() == number => Ok(true),
            Some(number) => {
                errors.push(ValidationError::NotAnInteger {
                    path: path.to_string(),
                    value: number,
                });
                Ok(false)
            }
            None => {
                errors.push(ValidationError::IntegerConstraints {
                    path: path.to_string(),
                });
                Ok(false)
            }
        }
    }

    pub(super) fn validate_boolean(&self, value: &Value, path: &str, errors: &mut ErrorSink) -> bool {
        if value.is_boolean() {
            return true;
        }
        errors.push(ValidationError::invalid_type(path, "boolean", value_type(value)));
        false
    }

    pub(super) fn validate_null(&self, value: &Value, path: &str, errors: &mut ErrorSink) -> bool {
        if value.is_null() {
            return true;
        }
        errors.push(ValidationError::invalid_type(path, "null", value_type(value)));
        false
    }
}
