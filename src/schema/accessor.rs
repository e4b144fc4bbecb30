//! Keyword access with reference resolution and type inheritance.
//!
//! Every validator reads schema keywords through [`SchemaAccessor`]. A lookup
//! first checks the node itself, then follows its `$ref` chain through the
//! [`ComponentTable`]. The `type` keyword additionally falls back to the
//! enclosing schema of a combinator branch, carried as a borrowed
//! [`SchemaScope`] parent link instead of being written into the shared node.

use super::registry::ComponentTable;
use super::types::SchemaKind;
use crate::error::{SchemaError, SchemaResult};
use serde_json::Value;

/// A schema node together with the schema that encloses it, if any.
///
/// The parent link only exists while a combinator subschema is being
/// evaluated and never outlives that evaluation.
#[derive(Debug, Clone, Copy)]
pub struct SchemaScope<'a> {
    pub node: &'a Value,
    pub parent: Option<&'a SchemaScope<'a>>,
}

impl<'a> SchemaScope<'a> {
    /// Scope without an enclosing schema.
    pub fn root(node: &'a Value) -> Self {
        Self { node, parent: None }
    }

    /// Scope for a subschema of `parent`.
    pub fn nested(node: &'a Value, parent: &'a SchemaScope<'a>) -> Self {
        Self {
            node,
            parent: Some(parent),
        }
    }
}

/// Outcome of resolving the effective `type` of a scope.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedType {
    /// A recognised type
    Kind(SchemaKind),
    /// A `type` value that is not one of the supported names
    Unsupported(String),
    /// No `type` anywhere in the node, its references or its ancestors
    Undetermined,
}

/// Reads schema keywords, resolving `$ref` against a component table.
#[derive(Debug, Clone, Copy)]
pub struct SchemaAccessor<'c> {
    components: &'c ComponentTable,
    max_hops: usize,
}

impl<'c> SchemaAccessor<'c> {
    pub fn new(components: &'c ComponentTable, max_hops: usize) -> Self {
        Self {
            components,
            max_hops,
        }
    }

    pub fn components(&self) -> &'c ComponentTable {
        self.components
    }

    /// Follow `$ref` links from `node` until a node without `$ref` is reached.
    pub fn resolve<'a>(&self, node: &'a Value) -> SchemaResult<&'a Value>
    where
        'c: 'a,
    {
        let mut current = node;
        let mut hops = 0;
        while let Some(reference) = reference_of(current) {
            current = self.follow(reference, &mut hops)?;
        }
        Ok(current)
    }

    /// Resolve a component by name or local reference, then its `$ref` chain.
    pub fn resolve_reference(&self, reference: &str) -> SchemaResult<&'c Value> {
        let mut hops = 0;
        let mut current = self.follow(reference, &mut hops)?;
        while let Some(next) = reference_of(current) {
            current = self.follow(next, &mut hops)?;
        }
        Ok(current)
    }

    fn follow(&self, reference: &str, hops: &mut usize) -> SchemaResult<&'c Value> {
        if *hops >= self.max_hops {
            return Err(SchemaError::ReferenceChainTooLong {
                reference: reference.to_string(),
                hops: *hops,
            });
        }
        *hops += 1;
        self.components.resolve(reference)
    }

    /// Value of `keyword` for the scope.
    ///
    /// Checks the node, then each node along its `$ref` chain. For `type`
    /// only, an absent value falls through to the parent scope.
    pub fn get<'a>(&self, scope: &SchemaScope<'a>, keyword: &str) -> SchemaResult<Option<&'a Value>>
    where
        'c: 'a,
    {
        let mut current = scope.node;
        let mut hops = 0;
        loop {
            if let Some(value) = current.get(keyword) {
                return Ok(Some(value));
            }
            match reference_of(current) {
                Some(reference) => current = self.follow(reference, &mut hops)?,
                None => break,
            }
        }

        match scope.parent {
            Some(parent) if keyword == "type" => self.get(parent, keyword),
            _ => Ok(None),
        }
    }

    /// Effective type of the scope.
    ///
    /// A scope with a parent link defaults to `object` when no ancestor
    /// declares a type.
    pub fn resolved_type(&self, scope: &SchemaScope<'_>) -> SchemaResult<ResolvedType> {
        match self.get(scope, "type")? {
            Some(Value::String(name)) => Ok(match name.parse::<SchemaKind>() {
                Ok(kind) => ResolvedType::Kind(kind),
                Err(unknown) => ResolvedType::Unsupported(unknown),
            }),
            Some(other) => Ok(ResolvedType::Unsupported(other.to_string())),
            None if scope.parent.is_some() => Ok(ResolvedType::Kind(SchemaKind::Object)),
            None => Ok(ResolvedType::Undetermined),
        }
    }

    /// Boolean keyword, `false` when absent or not a boolean.
    pub fn get_bool(&self, scope: &SchemaScope<'_>, keyword: &str) -> SchemaResult<bool> {
        Ok(self
            .get(scope, keyword)?
            .and_then(Value::as_bool)
            .unwrap_or(false))
    }

    /// Numeric keyword as `f64`.
    pub fn get_f64(&self, scope: &SchemaScope<'_>, keyword: &str) -> SchemaResult<Option<f64>> {
        Ok(self.get(scope, keyword)?.and_then(Value::as_f64))
    }

    /// Non-negative integer keyword such as `minItems`.
    pub fn get_u64(&self, scope: &SchemaScope<'_>, keyword: &str) -> SchemaResult<Option<u64>> {
        Ok(self.get(scope, keyword)?.and_then(|value| {
            value
                .as_u64()
                .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
        }))
    }

    /// String keyword such as `pattern`.
    pub fn get_str<'a>(&self, scope: &SchemaScope<'a>, keyword: &str) -> SchemaResult<Option<&'a str>>
    where
        'c: 'a,
    {
        Ok(self.get(scope, keyword)?.and_then(Value::as_str))
    }
}

/// The `$ref` target of a node, if it has one.
pub fn reference_of(node: &Value) -> Option<&str> {
    node.get("$ref").and_then(Value::as_str)
}
