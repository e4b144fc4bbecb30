//! Validation tests module.

pub mod combinators;
pub mod entry;

// Re-export commonly used test utilities
pub use crate::common::{check, check_with_config, fixtures, validate_with};

// Re-export assertion macros
pub use crate::{assert_message_contains, assert_valid, assert_violation};
