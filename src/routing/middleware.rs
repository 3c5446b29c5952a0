//! Middleware naming convention.
//!
//! Routes only carry middleware *names*. Authorization and validation entries
//! are written as `json-api.authorize:<id>` and `json-api.validate:<id>`;
//! whatever executes the route looks the identifier up.

use std::fmt;

/// Tag of authorization middleware entries.
pub const AUTHORIZE_TAG: &str = "json-api.authorize";

/// Tag of validation middleware entries.
pub const VALIDATE_TAG: &str = "json-api.validate";

/// A parsed middleware entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiddlewareName {
    Authorize(String),
    Validate(String),
    Other(String),
}

impl MiddlewareName {
    pub fn authorize(id: impl Into<String>) -> Self {
        Self::Authorize(id.into())
    }

    pub fn validate(id: impl Into<String>) -> Self {
        Self::Validate(id.into())
    }

    /// Parse a middleware entry. Anything without a known tag is `Other`.
    pub fn parse(name: &str) -> Self {
        match name.split_once(':') {
            Some((AUTHORIZE_TAG, id)) if !id.is_empty() => Self::Authorize(id.to_string()),
            Some((VALIDATE_TAG, id)) if !id.is_empty() => Self::Validate(id.to_string()),
            _ => Self::Other(name.to_string()),
        }
    }
}

impl fmt::Display for MiddlewareName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MiddlewareName::Authorize(id) => write!(f, "{AUTHORIZE_TAG}:{id}"),
            MiddlewareName::Validate(id) => write!(f, "{VALIDATE_TAG}:{id}"),
            MiddlewareName::Other(name) => f.write_str(name),
        }
    }
}
