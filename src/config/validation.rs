//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the prefix, resource types and relationship names are usable
//!   path segments
//! - Detect resources or relationships declared twice
//! - Validate value ranges (body size > 0, bind address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RoutesConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RoutesConfig;
use crate::routing::registrar::{validate_declaration, validate_prefix};
use crate::routing::RegistrarError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("server.prefix '{0}' must start with '/'")]
    Prefix(String),

    #[error("server.prefix: {0}")]
    PrefixSegment(#[source] RegistrarError),

    #[error("server.max_body_size must be greater than zero")]
    BodySize,

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    LogLevel(String),

    #[error("resources[{index}]: {source}")]
    Resource {
        index: usize,
        #[source]
        source: RegistrarError,
    },

    #[error("resources[{index}]: resource type '{resource_type}' is declared more than once")]
    DuplicateResource { index: usize, resource_type: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RoutesConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.server.bind_address.clone()));
    }
    let prefix = &config.server.prefix;
    if !prefix.is_empty() && !prefix.starts_with('/') {
        errors.push(ValidationError::Prefix(prefix.clone()));
    } else if let Err(source) = validate_prefix(prefix) {
        errors.push(ValidationError::PrefixSegment(source));
    }
    if config.server.max_body_size == 0 {
        errors.push(ValidationError::BodySize);
    }
    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    let mut seen = HashSet::new();
    for (index, resource) in config.resources.iter().enumerate() {
        if let Err(source) = validate_declaration(&resource.resource_type, &resource.declaration()) {
            errors.push(ValidationError::Resource { index, source });
        }
        if !seen.insert(resource.resource_type.as_str()) {
            errors.push(ValidationError::DuplicateResource {
                index,
                resource_type: resource.resource_type.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
