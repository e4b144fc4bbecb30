//! Schema components and keyword access.
//!
//! Schemas are kept as plain JSON values. This module provides the
//! [`ComponentTable`] that `$ref` resolves against, and the
//! [`SchemaAccessor`] through which every validator reads keywords.
//!
//! # Examples
//!
//! ```rust
//! use openapi_payload_validator::schema::{ComponentTable, SchemaAccessor, SchemaScope};
//! use serde_json::json;
//!
//! let components = ComponentTable::new()
//!     .with_schema("Name", json!({"type": "string", "minLength": 1}));
//! let accessor = SchemaAccessor::new(&components, 16);
//!
//! let node = json!({"$ref": "#/components/schemas/Name"});
//! let scope = SchemaScope::root(&node);
//! assert_eq!(accessor.get_u64(&scope, "minLength").unwrap(), Some(1));
//! ```

pub mod accessor;
pub mod registry;
pub mod types;


// Re-export the main types for convenience
pub use accessor::{ResolvedType, SchemaAccessor, SchemaScope, reference_of};
pub use registry::{COMPONENT_PREFIX, ComponentTable, component_name};
pub use types::{Combinator, SchemaKind};
