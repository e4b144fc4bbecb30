//! Error types for payload validation.
//!
//! Two classes of failure exist. [`SchemaError`] is a fault in the schema
//! document itself (a dangling `$ref`, a reference cycle, runaway nesting) and
//! aborts the whole validation call. [`ValidationError`] describes a single
//! violation found in the payload and is accumulated into an
//! [`ErrorSink`](crate::validation::ErrorSink) without stopping sibling checks.

/// Fatal errors caused by a broken schema document.
///
/// These abort the validation call that encountered them. They indicate that
/// the schema needs fixing, not the payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// A `$ref` (or discriminator mapping) names a component that does not exist
    #[error("Unresolved schema reference '{reference}'")]
    UnresolvedReference { reference: String },

    /// A `$ref` chain, cyclic or merely too long, exceeded the hop limit
    #[error("Schema reference '{reference}' exceeded the hop limit of {hops}")]
    ReferenceChainTooLong { reference: String, hops: usize },

    /// Validation recursed deeper than the configured limit
    #[error("{path}: schema nesting exceeds the maximum depth of {limit}")]
    DepthExceeded { path: String, limit: usize },

    /// The component table could not be built from the supplied document
    #[error("Invalid component table: {message}")]
    InvalidComponents { message: String },
}

/// A single violation found while validating a payload.
///
/// The `Display` output of each variant is the human-readable message handed
/// to callers, prefixed with the path at which the violation occurred.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The raw document is not valid JSON
    #[error("{path}: unable to decode JSON document: {details}")]
    Decode { path: String, details: String },

    /// Value has the wrong JSON type for the schema
    #[error("{path}: expected {expected}, got {actual}")]
    InvalidType {
        path: String,
        expected: String,
        actual: String,
    },

    /// Value is not one of the enumerated members
    #[error("{path}: value {value} does not match any allowed enum value")]
    EnumMismatch { path: String, value: String },

    // Object validation
    /// Required property is missing
    #[error("{path}: required property '{property}' is missing")]
    MissingRequiredProperty { path: String, property: String },

    /// A readOnly property was sent in a request
    #[error("{path}: property '{property}' is readOnly and must not be sent in a request")]
    ReadOnlyInRequest { path: String, property: String },

    /// A writeOnly property was returned in a response
    #[error("{path}: property '{property}' is writeOnly and must not be returned in a response")]
    WriteOnlyInResponse { path: String, property: String },

    /// Property listed under `not.required` is present
    #[error("{path}: property '{property}' is not allowed")]
    ForbiddenProperty { path: String, property: String },

    /// Property value matches a schema listed under `not.properties`
    #[error("{path}: property '{property}' matches a disallowed schema")]
    DisallowedPropertyShape { path: String, property: String },

    /// Property not declared while `additionalProperties` is false
    #[error("{path}: additional property '{property}' is not allowed")]
    AdditionalPropertyNotAllowed { path: String, property: String },

    /// Object has fewer properties than `minProperties`
    #[error("{path}: object has {count} properties, fewer than minProperties {min}")]
    TooFewProperties { path: String, count: usize, min: u64 },

    /// Object has more properties than `maxProperties`
    #[error("{path}: object has {count} properties, more than maxProperties {max}")]
    TooManyProperties { path: String, count: usize, max: u64 },

    // Array validation
    /// Array has fewer items than `minItems`
    #[error("{path}: array has {count} items, fewer than minItems {min}")]
    TooFewItems { path: String, count: usize, min: u64 },

    /// Array has more items than `maxItems`
    #[error("{path}: array has {count} items, more than maxItems {max}")]
    TooManyItems { path: String, count: usize, max: u64 },

    /// Array item duplicates an earlier item while `uniqueItems` is set
    #[error("{path}: item {index} duplicates item {first}, but uniqueItems is required")]
    DuplicateItem {
        path: String,
        index: usize,
        first: usize,
    },

    // String validation
    /// String does not match `pattern`
    #[error("{path}: value '{value}' does not match pattern '{pattern}'")]
    PatternMismatch {
        path: String,
        value: String,
        pattern: String,
    },

    /// String is shorter than `minLength`
    #[error("{path}: string length {length} is less than minLength {min}")]
    StringTooShort { path: String, length: usize, min: u64 },

    /// String is longer than `maxLength`
    #[error("{path}: string length {length} is greater than maxLength {max}")]
    StringTooLong { path: String, length: usize, max: u64 },

    /// String does not satisfy its declared `format`
    #[error("{path}: value '{value}' is not a valid {format}")]
    InvalidFormat {
        path: String,
        format: String,
        value: String,
    },

    // Numeric validation
    /// Number is below an inclusive `minimum`
    #[error("{path}: value {value} is less than minimum {minimum}")]
    BelowMinimum {
        path: String,
        value: f64,
        minimum: f64,
    },

    /// Number is not strictly above an exclusive minimum
    #[error("{path}: value {value} must be greater than exclusive minimum {minimum}")]
    NotAboveExclusiveMinimum {
        path: String,
        value: f64,
        minimum: f64,
    },

    /// Number is above an inclusive `maximum`
    #[error("{path}: value {value} is greater than maximum {maximum}")]
    AboveMaximum {
        path: String,
        value: f64,
        maximum: f64,
    },

    /// Number is not strictly below an exclusive maximum
    #[error("{path}: value {value} must be less than exclusive maximum {maximum}")]
    NotBelowExclusiveMaximum {
        path: String,
        value: f64,
        maximum: f64,
    },

    /// Number is not a multiple of `multipleOf`
    #[error("{path}: value {value} is not a multiple of {divisor}")]
    NotMultipleOf {
        path: String,
        value: f64,
        divisor: f64,
    },

    /// Integer schema rejected the value because its numeric checks failed
    #[error("{path}: value does not satisfy the integer constraints")]
    IntegerConstraints { path: String },

    /// Number has a fractional part where an integer is required
    #[error("{path}: value {value} is not an integer")]
    NotAnInteger { path: String, value: f64 },

    // Combinators
    /// `oneOf` discriminator property is absent from the value
    #[error("{path}: discriminator property '{property}' is missing")]
    DiscriminatorMissing { path: String, property: String },

    /// No `oneOf` subschema accepted the value
    #[error("{path}: value does not match any oneOf schema")]
    NoOneOfMatch { path: String },

    /// More than one `oneOf` subschema accepted the value
    #[error("{path}: value matches more than one oneOf schema: {matches:?}")]
    MultipleOneOfMatches { path: String, matches: Vec<String> },

    /// No `anyOf` subschema accepted the value
    #[error("{path}: value does not match any anyOf schema")]
    NoAnyOfMatch { path: String },

    /// At least one `allOf` subschema rejected the value
    #[error("{path}: value does not match {failed} of the allOf schemas")]
    AllOfMismatch { path: String, failed: usize },

    // Schema authoring faults that fail only the current path
    /// Schema declares more than one of oneOf/anyOf/allOf
    #[error("{path}: schema declares more than one of oneOf, anyOf, allOf")]
    ConflictingCombinators { path: String },

    /// A combinator keyword whose value is not a list of schemas
    #[error("{path}: '{combinator}' must be a list of schemas")]
    InvalidCombinator { path: String, combinator: String },

    /// Schema has no resolvable type and no combinator
    #[error("{path}: unable to determine schema type")]
    UndeterminedType { path: String },

    /// Schema names a type this validator does not know
    #[error("{path}: unsupported schema type '{type_name}'")]
    UnsupportedType { path: String, type_name: String },

    /// `pattern` is not a valid regular expression
    #[error("{path}: invalid pattern '{pattern}': {details}")]
    InvalidPattern {
        path: String,
        pattern: String,
        details: String,
    },
}

impl SchemaError {
    /// Create an unresolved reference error
    pub fn unresolved(reference: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            reference: reference.into(),
        }
    }

    /// Create an invalid component table error
    pub fn invalid_components(message: impl Into<String>) -> Self {
        Self::InvalidComponents {
            message: message.into(),
        }
    }
}

impl ValidationError {
    /// Create an invalid type error
    pub fn invalid_type(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidType {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a missing required property error
    pub fn missing_required(path: impl Into<String>, property: impl Into<String>) -> Self {
        Self::MissingRequiredProperty {
            path: path.into(),
            property: property.into(),
        }
    }

    /// Path at which this violation was found.
    pub fn path(&self) -> &str {
        match self {
            Self::Decode { path, .. }
            | Self::InvalidType { path, .. }
            | Self::EnumMismatch { path, .. }
            | Self::MissingRequiredProperty { path, .. }
            | Self::ReadOnlyInRequest { path, .. }
            | Self::WriteOnlyInResponse { path, .. }
            | Self::ForbiddenProperty { path, .. }
            | Self::DisallowedPropertyShape { path, .. }
            | Self::AdditionalPropertyNotAllowed { path, .. }
            | Self::TooFewProperties { path, .. }
            | Self::TooManyProperties { path, .. }
            | Self::TooFewItems { path, .. }
            | Self::TooManyItems { path, .. }
            | Self::DuplicateItem { path, .. }
            | Self::PatternMismatch { path, .. }
            | Self::StringTooShort { path, .. }
            | Self::StringTooLong { path, .. }
            | Self::InvalidFormat { path, .. }
            | Self::BelowMinimum { path, .. }
            | Self::NotAboveExclusiveMinimum { path, .. }
            | Self::AboveMaximum { path, .. }
            | Self::NotBelowExclusiveMaximum { path, .. }
            | Self::NotMultipleOf { path, .. }
            | Self::IntegerConstraints { path }
            | Self::NotAnInteger { path, .. }
            | Self::DiscriminatorMissing { path, .. }
            | Self::NoOneOfMatch { path }
            | Self::MultipleOneOfMatches { path, .. }
            | Self::NoAnyOfMatch { path }
            | Self::AllOfMismatch { path, .. }
            | Self::ConflictingCombinators { path }
            | Self::InvalidCombinator { path, .. }
            | Self::UndeterminedType { path }
            | Self::UnsupportedType { path, .. }
            | Self::InvalidPattern { path, .. } => path,
        }
    }
}

// Result type aliases for convenience
pub type SchemaResult<T> = Result<T, SchemaError>;
