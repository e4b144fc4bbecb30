//! Array validation.

use super::canonical::canonical_digest;
use super::{ErrorSink, Validator, value_type};
use crate::context::ValidationContext;
use crate::error::{SchemaResult, ValidationError};
use crate::schema::SchemaScope;
use serde_json::Value;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

impl<'c> Validator<'c> {
    pub(super) fn validate_array(
        &self,
        value: &Value,
        scope: &SchemaScope<'_>,
        path: &str,
        errors: &mut ErrorSink,
        context: &mut ValidationContext,
        depth: usize,
    ) -> SchemaResult<bool> {
        let Some(items) = value.as_array() else {
            errors.push(ValidationError::invalid_type(path, "array", value_type(value)));
            return Ok(false);
        };

        let mut valid = true;
        let count = items.len();

        if let Some(min) = self.accessor.get_u64(scope, "minItems")? {
            if (count as u64) < min {
                errors.push(ValidationError::TooFewItems {
                    path: path.to_string(),
                    count,
                    min,
                });
                valid = false;
            }
        }
        if let Some(max) = self.accessor.get_u64(scope, "maxItems")? {
            if (count as u64) > max {
                errors.push(ValidationError::TooManyItems {
                    path: path.to_string(),
                    count,
                    max,
                });
                valid = false;
            }
        }

        if self.accessor.get_bool(scope, "uniqueItems")? {
            let mut seen: HashMap<[u8; 32], usize> = HashMap::with_capacity(count);
            for (index, item) in items.iter().enumerate() {
                match seen.entry(canonical_digest(item)) {
                    Entry::Occupied(first) => {
                        errors.push(ValidationError::DuplicateItem {
                            path: path.to_string(),
                            index,
                            first: *first.get(),
                        });
                        valid = false;
                        break;
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(index);
                    }
                }
            }
        }

        if let Some(item_schema) = self.accessor.get(scope, "items")? {
            let child = SchemaScope::root(item_schema);
            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{}[{}]", path, index);
                if !self.dispatch(item, &child, &item_path, errors, context, depth + 1)? {
                    valid = false;
                }
            }
        }

        Ok(valid)
    }
}
