//! Per-call validation context.
//!
//! A [`ValidationContext`] is created for one top-level validation call and
//! owned exclusively by it. It tells the validators which direction the
//! payload travels in and collects callback registrations as a side channel.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Direction of the payload being validated.
///
/// Drives readOnly/writeOnly enforcement: readOnly properties must not appear
/// in requests, writeOnly properties must not appear in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextKind {
    /// Payload sent by a client
    Request,
    /// Payload returned by a server
    Response,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request => write!(f, "request"),
            Self::Response => write!(f, "response"),
        }
    }
}

/// State carried through a single validation call.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    kind: ContextKind,
    callback_spec: HashMap<String, Value>,
    callback_map: HashMap<String, Value>,
}

impl ValidationContext {
    /// Create a context without any callback templates.
    pub fn new(kind: ContextKind) -> Self {
        Self {
            kind,
            callback_spec: HashMap::new(),
            callback_map: HashMap::new(),
        }
    }

    /// Context for validating a request payload.
    pub fn request() -> Self {
        Self::new(ContextKind::Request)
    }

    /// Context for validating a response payload.
    pub fn response() -> Self {
        Self::new(ContextKind::Response)
    }

    /// Attach callback templates, keyed by runtime expression such as
    /// `{$request.body#/callbackUrl}`.
    pub fn with_callback_spec(mut self, callback_spec: HashMap<String, Value>) -> Self {
        self.callback_spec = callback_spec;
        self
    }

    pub fn kind(&self) -> ContextKind {
        self.kind
    }

    pub fn callback_spec(&self) -> &HashMap<String, Value> {
        &self.callback_spec
    }

    /// Callback identifiers found in the payload, mapped to the schema that
    /// governs their payloads.
    pub fn callback_map(&self) -> &HashMap<String, Value> {
        &self.callback_map
    }

    /// Consume the context, keeping the registered callbacks.
    pub fn into_callback_map(self) -> HashMap<String, Value> {
        self.callback_map
    }

    pub(crate) fn record_callback(&mut self, identifier: String, schema: Value) {
        self.callback_map.insert(identifier, schema);
    }

    /// Whether a property flagged readOnly/writeOnly is out of place here.
    pub(crate) fn forbids(&self, read_only: bool, write_only: bool) -> bool {
        match self.kind {
            ContextKind::Request => read_only,
            ContextKind::Response => write_only,
        }
    }
}
