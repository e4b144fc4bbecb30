//! OpenAPI payload validation for Rust.
//!
//! Checks JSON request and response bodies against the component schemas of
//! an API contract and reports every violation as a human-readable message.
//! readOnly and writeOnly properties are enforced according to the direction
//! of the payload.
//!
//! # Core Components
//!
//! - [`Validator`] - Recursive validation engine over a [`ComponentTable`]
//! - [`ValidationContext`] - Per-call direction and callback bookkeeping
//! - [`ValidationReport`] - Validity plus the collected errors
//!
//! # Quick Start
//!
//! ```rust
//! use openapi_payload_validator::{ComponentTable, ValidationContext, Validator};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let components = ComponentTable::from_document(&json!({
//!     "openapi": "3.0.3",
//!     "components": {"schemas": {
//!         "User": {
//!             "type": "object",
//!             "required": ["id", "email"],
//!             "properties": {
//!                 "id": {"type": "integer", "readOnly": true},
//!                 "email": {"type": "string", "format": "email"}
//!             }
//!         }
//!     }}
//! }))?;
//! let validator = Validator::new(&components);
//! let schema = json!({"$ref": "#/components/schemas/User"});
//!
//! // `id` is readOnly, so a request may omit it.
//! let mut context = ValidationContext::request();
//! let report = validator.validate(r#"{"email": "a@example.com"}"#, &schema, "body", &mut context)?;
//! assert!(report.is_valid());
//! # Ok(())
//! # }
//! ```

pub mod callback;
pub mod config;
pub mod context;
pub mod error;
pub mod schema;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::ValidatorConfig;
pub use context::{ContextKind, ValidationContext};
pub use error::{SchemaError, SchemaResult, ValidationError};
pub use schema::{ComponentTable, SchemaKind};
pub use validation::{ErrorEntry, ErrorSink, ValidationReport, Validator};
