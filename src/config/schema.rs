//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the route registrar.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::declaration::{RelationshipNames, ResourceDeclaration};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RoutesConfig {
    /// HTTP server settings.
    pub server: ServerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Resources to register, in order.
    pub resources: Vec<ResourceConfig>,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Path prefix for every resource (e.g., "/api/v1").
    pub prefix: String,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            prefix: String::new(),
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// One `[[resources]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ResourceConfig {
    /// Resource type, used as path segment (e.g., "posts").
    #[serde(rename = "type")]
    pub resource_type: String,

    #[serde(default)]
    pub controller: Option<String>,

    #[serde(default)]
    pub authorizer: Option<String>,

    #[serde(default)]
    pub validators: Option<String>,

    /// One name or a list of names.
    #[serde(default)]
    pub has_one: RelationshipNames,

    /// One name or a list of names.
    #[serde(default)]
    pub has_many: RelationshipNames,

    #[serde(default)]
    pub middleware: Vec<String>,
}

impl ResourceConfig {
    /// The declaration handed to the registrar.
    pub fn declaration(&self) -> ResourceDeclaration {
        ResourceDeclaration {
            controller: self.controller.clone(),
            authorizer: self.authorizer.clone(),
            validators: self.validators.clone(),
            has_one: self.has_one.clone(),
            has_many: self.has_many.clone(),
            middleware: self.middleware.clone(),
        }
    }
}

impl RoutesConfig {
    /// `(resource type, declaration)` pairs in file order.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, ResourceDeclaration)> {
        self.resources
            .iter()
            .map(|r| (r.resource_type.as_str(), r.declaration()))
    }
}
