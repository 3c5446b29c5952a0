//! Routing error definitions.

use axum::http::{Method, StatusCode};
use thiserror::Error;

/// Errors raised by a routing engine while accepting registrations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The same method and path were registered twice.
    #[error("route {method} {path} is already registered")]
    Duplicate { method: Method, path: String },

    /// An identifier could not be resolved to an implementation.
    #[error("no {kind} registered under '{name}'")]
    Unresolved { kind: &'static str, name: String },
}

/// Errors raised while expanding a resource declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrarError {
    #[error("resource type must not be empty")]
    EmptyResourceType,

    /// A name cannot be used as a literal path segment.
    #[error("invalid {what} '{value}': {reason}")]
    InvalidSegment {
        what: &'static str,
        value: String,
        reason: &'static str,
    },

    /// A relationship name was declared more than once.
    #[error("relationship '{name}' is declared more than once on '{resource_type}'")]
    DuplicateRelationship { resource_type: String, name: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors raised while matching a request against a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// No registered path matches.
    #[error("no route matches {path}")]
    NotFound { path: String },

    /// The path matches but not for this method.
    #[error("{method} is not allowed for {path}")]
    MethodNotAllowed {
        method: Method,
        path: String,
        allowed: Vec<Method>,
    },
}

impl MatchError {
    /// HTTP status the error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            MatchError::NotFound { .. } => StatusCode::NOT_FOUND,
            MatchError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}
