//! Validator configuration.
//!
//! [`ValidatorConfig`] carries the few knobs that change validation behaviour
//! without changing the schema: numeric tolerance, recursion guards and format
//! checking. It deserializes from JSON so hosts can keep it alongside their
//! other settings.

use serde::{Deserialize, Serialize};

/// Tuning options for a [`Validator`](crate::validation::Validator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidatorConfig {
    /// Allowed distance between `value / multipleOf` and the nearest non-zero
    /// integer, relative to the quotient's magnitude (at least 1).
    /// Zero selects the exact floating remainder check.
    pub multiple_of_epsilon: f64,

    /// Maximum dispatcher recursion depth before the call is aborted.
    pub max_depth: usize,

    /// Maximum number of `$ref` hops followed while resolving one reference.
    pub max_reference_hops: usize,

    /// Whether the string `format` keyword is enforced.
    pub check_formats: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            multiple_of_epsilon: 1e-9,
            max_depth: 256,
            max_reference_hops: 64,
            check_formats: true,
        }
    }
}

impl ValidatorConfig {
    /// Set the `multipleOf` tolerance.
    pub fn with_multiple_of_epsilon(mut self, epsilon: f64) -> Self {
        self.multiple_of_epsilon = epsilon.abs();
        self
    }

    /// Use the exact floating remainder for `multipleOf`.
    pub fn with_exact_multiple_of(self) -> Self {
        self.with_multiple_of_epsilon(0.0)
    }

    /// Set the maximum recursion depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the maximum `$ref` chain length.
    pub fn with_max_reference_hops(mut self, hops: usize) -> Self {
        self.max_reference_hops = hops;
        self
    }

    /// Enable or disable `format` checks.
    pub fn with_format_checks(mut self, enabled: bool) -> Self {
        self.check_formats = enabled;
        self
    }
}
