//! Component table for resolving schema references.
//!
//! The [`ComponentTable`] is the immutable set of named schemas a `$ref` can
//! point at. It is built once, then shared read-only by any number of
//! validation calls, including calls running on different threads.

use crate::error::{SchemaError, SchemaResult};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Prefix of local component references in an OpenAPI document.
pub const COMPONENT_PREFIX: &str = "#/components/schemas/";

/// Named schema components addressable by `$ref`.
#[derive(Debug, Clone, Default)]
pub struct ComponentTable {
    schemas: HashMap<String, Value>,
}

impl ComponentTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from an already decoded document.
    ///
    /// Accepts either a whole OpenAPI document, whose `components.schemas`
    /// object is used, or a bare object mapping component names to schemas.
    pub fn from_document(document: &Value) -> SchemaResult<Self> {
        let obj = document
            .as_object()
            .ok_or_else(|| SchemaError::invalid_components("document must be a JSON object"))?;

        if obj.contains_key("openapi") || obj.contains_key("components") {
            return match obj.get("components").and_then(|c| c.get("schemas")) {
                Some(Value::Object(schemas)) => Ok(Self::from_map(schemas)),
                Some(_) => Err(SchemaError::invalid_components(
                    "'components.schemas' must be a JSON object",
                )),
                None => Ok(Self::new()),
            };
        }

        Ok(Self::from_map(obj))
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let schemas = map
            .iter()
            .map(|(name, schema)| (name.clone(), schema.clone()))
            .collect();
        Self { schemas }
    }

    /// Add a component to the table.
    pub fn insert(&mut self, name: impl Into<String>, schema: Value) {
        self.schemas.insert(name.into(), schema);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_schema(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.insert(name, schema);
        self
    }

    /// Look up a component by bare name or local reference.
    pub fn get(&self, reference: &str) -> Option<&Value> {
        self.schemas.get(component_name(reference))
    }

    /// Look up a component, failing with [`SchemaError::UnresolvedReference`].
    pub fn resolve(&self, reference: &str) -> SchemaResult<&Value> {
        self.get(reference)
            .ok_or_else(|| SchemaError::unresolved(reference))
    }

    /// Names of all components.
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Strip the local component prefix from a reference.
pub fn component_name(reference: &str) -> &str {
    reference
        .strip_prefix(COMPONENT_PREFIX)
        .unwrap_or(reference)
}
