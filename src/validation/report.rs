//! Error collection and validation reports.

use crate::error::ValidationError;

/// One entry in an [`ErrorSink`].
///
/// Combinators nest the errors of each rejected subschema under a `Group`
/// keyed by the branch (`oneOf[0]`, `discriminator[dog]`, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorEntry {
    Leaf(ValidationError),
    Group {
        key: String,
        errors: Vec<ErrorEntry>,
    },
}

impl ErrorEntry {
    fn collect_messages(&self, prefix: &str, out: &mut Vec<String>) {
        match self {
            Self::Leaf(error) => out.push(format!("{}{}", prefix, error)),
            Self::Group { key, errors } => {
                let nested = format!("{}{}: ", prefix, key);
                for entry in errors {
                    entry.collect_messages(&nested, out);
                }
            }
        }
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a ValidationError>) {
        match self {
            Self::Leaf(error) => out.push(error),
            Self::Group { errors, .. } => {
                for entry in errors {
                    entry.collect_leaves(out);
                }
            }
        }
    }
}

/// Ordered, append-only collection of validation errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorSink {
    entries: Vec<ErrorEntry>,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a violation.
    pub fn push(&mut self, error: ValidationError) {
        self.entries.push(ErrorEntry::Leaf(error));
    }

    /// Append the errors of a sub-evaluation under `key`.
    pub fn push_group(&mut self, key: impl Into<String>, errors: ErrorSink) {
        self.entries.push(ErrorEntry::Group {
            key: key.into(),
            errors: errors.entries,
        });
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All violations, groups flattened in order.
    pub fn leaves(&self) -> Vec<&ValidationError> {
        let mut out = Vec::new();
        for entry in &self.entries {
            entry.collect_leaves(&mut out);
        }
        out
    }

    /// Human-readable lines, nested entries prefixed with their group keys.
    pub fn messages(&self) -> Vec<String> {
        let mut out = Vec::new();
        for entry in &self.entries {
            entry.collect_messages("", &mut out);
        }
        out
    }
}

/// Result of validating one document.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: ErrorSink,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.messages()
    }

    /// The `(valid, messages)` pair.
    pub fn into_parts(self) -> (bool, Vec<String>) {
        let messages = self.errors.messages();
        (self.valid, messages)
    }
}
