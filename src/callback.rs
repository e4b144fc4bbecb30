//! Callback registration.
//!
//! OpenAPI callbacks are keyed by runtime expressions such as
//! `{$request.body#/subscription/callbackUrl}`. While validating a payload,
//! every string leaf is checked against the context's callback templates; when
//! the leaf's location matches one, the leaf (the callback URL) is recorded
//! together with the schema governing the callback payload. Registration is
//! bookkeeping only and never fails validation.

use crate::context::ValidationContext;
use log::debug;

/// Derive the runtime-expression template for a validation path.
///
/// The segment before the first `[` is the root marker, `{...}` annotations
/// (combinator and discriminator markers) are dropped and every `[key]`
/// becomes a JSON-pointer segment.
///
/// ```
/// use openapi_payload_validator::callback::callback_template;
///
/// assert_eq!(
///     callback_template("body[subscription]{sub:0}[callbackUrl]"),
///     "{$request.body#/subscription/callbackUrl}"
/// );
/// ```
pub fn callback_template(path: &str) -> String {
    let mut pointer = String::new();
    let segments = match path.find('[') {
        Some(start) => &path[start..],
        None => "",
    };

    let mut chars = segments.chars();
    while let Some(c) = chars.next() {
        match c {
            '{' => {
                let mut depth = 1;
                for inner in chars.by_ref() {
                    match inner {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                }
            }
            '[' => {
                pointer.push('/');
                for inner in chars.by_ref() {
                    match inner {
                        ']' => break,
                        '~' => pointer.push_str("~0"),
                        '/' => pointer.push_str("~1"),
                        other => pointer.push(other),
                    }
                }
            }
            _ => {}
        }
    }

    format!("{{$request.body#{}}}", pointer)
}

/// Record `leaf` in the context's callback map if its path names a callback.
pub(crate) fn register(leaf: &str, path: &str, context: &mut ValidationContext) {
    if context.callback_spec().is_empty() {
        return;
    }

    let template = callback_template(path);
    let Some(schema) = context.callback_spec().get(&template).cloned() else {
        return;
    };

    debug!("Registered callback '{}' for template {}", leaf, template);
    context.record_callback(leaf.to_string(), schema);
}
