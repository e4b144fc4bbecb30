//! String `format` checks.
//!
//! Formats without a checker here are accepted, as OpenAPI treats `format` as
//! an open-ended annotation.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, FixedOffset, NaiveDate};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Whether `value` satisfies `format`.
pub fn is_valid_format(format: &str, value: &str) -> bool {
    match format {
        "date-time" => DateTime::<FixedOffset>::parse_from_rfc3339(value).is_ok(),
        "date" => NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
        "uuid" => uuid::Uuid::parse_str(value).is_ok(),
        "byte" => STANDARD.decode(value).is_ok(),
        "email" => is_valid_email(value),
        "ipv4" => value.parse::<Ipv4Addr>().is_ok(),
        "ipv6" => value.parse::<Ipv6Addr>().is_ok(),
        _ => true,
    }
}

// Shape check only: one '@', non-empty local part, dotted domain.
fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}
