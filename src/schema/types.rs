//! Core schema type definitions.
//!
//! Schema nodes themselves stay as [`serde_json::Value`]; these types name the
//! closed sets of keywords the validator dispatches on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The JSON type a schema node constrains its value to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaKind {
    /// JSON object with properties
    Object,
    /// JSON array
    Array,
    /// JSON string
    String,
    /// Any JSON number
    Number,
    /// JSON number without fractional part
    Integer,
    /// JSON boolean
    Boolean,
    /// JSON null
    Null,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

impl FromStr for SchemaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "object" => Ok(Self::Object),
            "array" => Ok(Self::Array),
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "integer" => Ok(Self::Integer),
            "boolean" => Ok(Self::Boolean),
            "null" => Ok(Self::Null),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema composition keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Exactly one subschema must accept the value
    OneOf,
    /// At least one subschema must accept the value
    AnyOf,
    /// Every subschema must accept the value
    AllOf,
}

impl Combinator {
    pub const ALL: [Combinator; 3] = [Self::OneOf, Self::AnyOf, Self::AllOf];

    /// Keyword as it appears in a schema.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::OneOf => "oneOf",
            Self::AnyOf => "anyOf",
            Self::AllOf => "allOf",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
