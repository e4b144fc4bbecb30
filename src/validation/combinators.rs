//! `oneOf`, `anyOf` and `allOf` evaluation.
//!
//! Each subschema is validated independently with the enclosing schema as its
//! parent scope, so a branch without its own `type` inherits the parent's.
//! A `oneOf` with a `discriminator` skips the tally and validates only the
//! branch selected by the discriminator property.

use super::{ErrorSink, Validator};
use crate::context::ValidationContext;
use crate::error::{SchemaResult, ValidationError};
use crate::schema::{Combinator, SchemaScope};
use log::{debug, warn};
use serde_json::Value;

/// Outcome of validating a value against a list of subschemas.
#[derive(Debug, Default)]
struct Tally {
    valid: usize,
    invalid: usize,
    /// Description or index of each accepting subschema
    matched: Vec<String>,
    /// Errors of each rejecting subschema, keyed by branch
    rejected: Vec<(String, ErrorSink)>,
}

impl<'c> Validator<'c> {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn evaluate_combinator(
        &self,
        value: &Value,
        scope: &SchemaScope<'_>,
        combinator: Combinator,
        subschemas: &Value,
        path: &str,
        errors: &mut ErrorSink,
        context: &mut ValidationContext,
        depth: usize,
    ) -> SchemaResult<bool> {
        let Some(branches) = subschemas.as_array() else {
            warn!("{}: '{}' is not a list of schemas", path, combinator);
            errors.push(ValidationError::InvalidCombinator {
                path: path.to_string(),
                combinator: combinator.to_string(),
            });
            return Ok(false);
        };

        let discriminator = match combinator {
            Combinator::OneOf => self.accessor.get(scope, "discriminator")?,
            _ => None,
        };
        let property_name = discriminator
            .and_then(|d| d.get("propertyName"))
            .and_then(Value::as_str);

        let tally = match (discriminator, property_name) {
            (Some(discriminator), Some(property)) => self.select_by_discriminator(
                value,
                scope,
                discriminator,
                property,
                path,
                context,
                depth,
            )?,
            _ => self.tally_subschemas(value, scope, combinator, branches, path, context, depth)?,
        };

        let accepted = match combinator {
            Combinator::OneOf => tally.valid == 1,
            Combinator::AnyOf => tally.valid >= 1,
            Combinator::AllOf => tally.invalid == 0,
        };
        if accepted {
            return Ok(true);
        }

        let path = path.to_string();
        match combinator {
            Combinator::OneOf if tally.valid > 1 => {
                errors.push(ValidationError::MultipleOneOfMatches {
                    path,
                    matches: tally.matched,
                });
                return Ok(false);
            }
            Combinator::OneOf => errors.push(ValidationError::NoOneOfMatch { path }),
            Combinator::AnyOf => errors.push(ValidationError::NoAnyOfMatch { path }),
            Combinator::AllOf => errors.push(ValidationError::AllOfMismatch {
                path,
                failed: tally.invalid,
            }),
        }
        for (key, branch_errors) in tally.rejected {
            errors.push_group(key, branch_errors);
        }
        Ok(false)
    }

    #[allow(clippy::too_many_arguments)]
    fn tally_subschemas(
        &self,
        value: &Value,
        scope: &SchemaScope<'_>,
        combinator: Combinator,
        branches: &[Value],
        path: &str,
        context: &mut ValidationContext,
        depth: usize,
    ) -> SchemaResult<Tally> {
        let mut tally = Tally::default();
        for (index, branch) in branches.iter().enumerate() {
            let child = SchemaScope::nested(branch, scope);
            let branch_path = format!("{}{{sub:{}}}", path, index);
            let mut branch_errors = ErrorSink::new();

            if self.dispatch(value, &child, &branch_path, &mut branch_errors, context, depth + 1)? {
                tally.valid += 1;
                let description = self
                    .accessor
                    .get_str(&child, "description")?
                    .map(str::to_string)
                    .unwrap_or_else(|| index.to_string());
                tally.matched.push(description);
            } else {
                tally.invalid += 1;
                tally
                    .rejected
                    .push((format!("{}[{}]", combinator, index), branch_errors));
            }
        }
        Ok(tally)
    }

    /// Validate against the single branch named by the discriminator.
    ///
    /// The branch comes from `discriminator.mapping`, falling back to the
    /// property value itself as a component name.
    #[allow(clippy::too_many_arguments)]
    fn select_by_discriminator(
        &self,
        value: &Value,
        scope: &SchemaScope<'_>,
        discriminator: &Value,
        property: &str,
        path: &str,
        context: &mut ValidationContext,
        depth: usize,
    ) -> SchemaResult<Tally> {
        let mut tally = Tally::default();

        let Some(selector) = value.get(property) else {
            let mut branch_errors = ErrorSink::new();
            branch_errors.push(ValidationError::DiscriminatorMissing {
                path: path.to_string(),
                property: property.to_string(),
            });
            tally.invalid = 1;
            tally
                .rejected
                .push((format!("discriminator[{}]", property), branch_errors));
            return Ok(tally);
        };
        let selector = match selector.as_str() {
            Some(s) => s.to_string(),
            None => selector.to_string(),
        };

        let target: &Value = match discriminator.get("mapping").and_then(|m| m.get(&selector)) {
            Some(Value::String(reference)) => self.accessor.resolve_reference(reference)?,
            Some(inline) => self.accessor.resolve(inline)?,
            None => self.accessor.resolve_reference(&selector)?,
        };
        debug!("{}: discriminator {}={} selected branch", path, property, selector);

        let child = SchemaScope::nested(target, scope);
        let branch_path = format!("{}{{{}={}}}", path, property, selector);
        let mut branch_errors = ErrorSink::new();

        if self.dispatch(value, &child, &branch_path, &mut branch_errors, context, depth + 1)? {
            tally.valid = 1;
            tally.matched.push(selector);
        } else {
            tally.invalid = 1;
            tally
                .rejected
                .push((format!("discriminator[{}]", selector), branch_errors));
        }
        Ok(tally)
    }
}
