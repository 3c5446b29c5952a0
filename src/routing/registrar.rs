//! Resource route expansion.
//!
//! # Responsibilities
//! - Expand a resource declaration into concrete route registrations
//! - Derive the default controller identifier from the resource type
//! - Attach authorization and validation middleware to every route
//! - Hand the registrations to a routing engine
//!
//! # Route Layout
//! ```text
//! GET    /<type>                              index
//! POST   /<type>                              create
//! GET    /<type>/{id}                         read
//! PATCH  /<type>/{id}                         update
//! DELETE /<type>/{id}                         delete
//!
//! has-one and has-many <rel>:
//! GET    /<type>/{id}/<rel>                   read-related
//! GET    /<type>/{id}/relationships/<rel>     read-relationship
//! PATCH  /<type>/{id}/relationships/<rel>     replace-relationship
//!
//! has-many <rel> only:
//! POST   /<type>/{id}/relationships/<rel>     add-relationship
//! DELETE /<type>/{id}/relationships/<rel>     remove-relationship
//! ```
//!
//! # Design Decisions
//! - Relationship paths are literal per name, never `{relationship}`
//!   wildcards, so an undeclared name is "not found" while a declared name
//!   with the wrong verb is "method not allowed"
//! - The whole declaration is checked before the first route is registered
//! - The routing engine is passed in, never looked up globally

use std::collections::HashSet;

use tracing::{debug, info, trace};

use crate::routing::declaration::ResourceDeclaration;
use crate::routing::error::RegistrarError;
use crate::routing::middleware::MiddlewareName;
use crate::routing::route::{
    Action, ActionIdentifier, RouteParameters, RouteRegistration, RouteRegistry,
    RELATIONSHIP_NAME, RESOURCE_ID, RESOURCE_TYPE,
};

/// Path segment preceding relationship names on relationship routes.
pub const RELATIONSHIPS_SEGMENT: &str = "relationships";

/// Registers JSON:API resources into a routing engine.
#[derive(Debug)]
pub struct ResourceRegistrar<R> {
    registry: R,
    prefix: String,
}

impl<R: RouteRegistry> ResourceRegistrar<R> {
    /// Create a registrar writing into `registry`.
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            prefix: String::new(),
        }
    }

    /// Prefix every path, e.g. `/api/v1`. Trailing slashes are dropped.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim_end_matches('/');
        self.prefix = if trimmed.is_empty() || trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Register every route for `resource_type`.
    ///
    /// Returns the number of routes registered.
    pub fn resource(
        &mut self,
        resource_type: &str,
        declaration: ResourceDeclaration,
    ) -> Result<usize, RegistrarError> {
        let routes = expand(&self.prefix, resource_type, &declaration)?;
        let count = routes.len();

        for route in routes {
            debug!(
                method = %route.method,
                path = %route.path,
                action = %route.action,
                "Registering route"
            );
            self.registry.register(route)?;
        }

        info!(
            resource_type = %resource_type,
            routes = count,
            "Resource registered"
        );
        Ok(count)
    }

    /// Register several resources in order, stopping at the first error.
    pub fn resources<'a, I>(&mut self, resources: I) -> Result<usize, RegistrarError>
    where
        I: IntoIterator<Item = (&'a str, ResourceDeclaration)>,
    {
        let mut total = 0;
        for (resource_type, declaration) in resources {
            total += self.resource(resource_type, declaration)?;
        }
        Ok(total)
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn into_inner(self) -> R {
        self.registry
    }
}

/// Expand a declaration into its registrations without registering them.
pub fn expand(
    prefix: &str,
    resource_type: &str,
    declaration: &ResourceDeclaration,
) -> Result<Vec<RouteRegistration>, RegistrarError> {
    validate_prefix(prefix)?;
    validate_declaration(resource_type, declaration)?;
    let relationships = declaration.relationships();

    let controller = declaration
        .controller
        .clone()
        .unwrap_or_else(|| default_controller(resource_type));
    let middleware = middleware_for(declaration);

    let collection = format!("{prefix}/{resource_type}");
    let member = format!("{collection}/{{{RESOURCE_ID}}}");

    let route = |action: Action, path: &str, relationship: Option<&str>| {
        let mut parameters = RouteParameters::new();
        parameters.insert(RESOURCE_TYPE, resource_type);
        if let Some(name) = relationship {
            parameters.insert(RELATIONSHIP_NAME, name);
        }
        RouteRegistration {
            method: action.http_method(),
            path: path.to_string(),
            action: ActionIdentifier::new(controller.as_str(), action),
            parameters,
            middleware: middleware.clone(),
        }
    };

    let mut routes = vec![
        route(Action::Index, collection.as_str(), None),
        route(Action::Create, collection.as_str(), None),
        route(Action::Read, member.as_str(), None),
        route(Action::Update, member.as_str(), None),
        route(Action::Delete, member.as_str(), None),
    ];

    for relationship in &relationships {
        let name = relationship.name.as_str();
        let related = format!("{member}/{name}");
        let linkage = format!("{member}/{RELATIONSHIPS_SEGMENT}/{name}");
        trace!(
            resource_type = %resource_type,
            relationship = %name,
            kind = relationship.kind.as_str(),
            "Expanding relationship"
        );

        for action in relationship.kind.actions() {
            let path = match action {
                Action::ReadRelated => related.as_str(),
                _ => linkage.as_str(),
            };
            routes.push(route(*action, path, Some(name)));
        }
    }

    Ok(routes)
}

/// Default controller for a resource type: `blog-posts` → `BlogPostsController`.
pub fn default_controller(resource_type: &str) -> String {
    let mut name: String = resource_type
        .split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    name.push_str("Controller");
    name
}

/// Check that `value` can be used verbatim as a single literal path segment.
pub fn validate_segment(what: &'static str, value: &str) -> Result<(), RegistrarError> {
    let reason = if value.is_empty() {
        Some("must not be empty")
    } else if value.contains('/') {
        Some("must not contain '/'")
    } else if value.contains(['{', '}', '*']) || value.starts_with(':') {
        Some("must not contain route placeholders")
    } else if value.contains(['?', '#']) || value.chars().any(char::is_whitespace) {
        Some("must not contain whitespace, '?' or '#'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(RegistrarError::InvalidSegment {
            what,
            value: value.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Check every segment of a route prefix such as `/api/v1`.
///
/// The empty prefix is valid.
pub fn validate_prefix(prefix: &str) -> Result<(), RegistrarError> {
    let trimmed = prefix.trim_start_matches('/').trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(());
    }
    trimmed
        .split('/')
        .try_for_each(|segment| validate_segment("prefix segment", segment))
}

/// Check a declaration can be expanded without registering anything.
pub fn validate_declaration(
    resource_type: &str,
    declaration: &ResourceDeclaration,
) -> Result<(), RegistrarError> {
    if resource_type.is_empty() {
        return Err(RegistrarError::EmptyResourceType);
    }
    validate_segment("resource type", resource_type)?;

    let relationships = declaration.relationships();
    let mut seen = HashSet::new();
    for relationship in &relationships {
        validate_segment("relationship name", &relationship.name)?;
        if !seen.insert(relationship.name.as_str()) {
            return Err(RegistrarError::DuplicateRelationship {
                resource_type: resource_type.to_string(),
                name: relationship.name.clone(),
            });
        }
    }
    Ok(())
}

fn middleware_for(declaration: &ResourceDeclaration) -> Vec<String> {
    let mut middleware = Vec::new();
    if let Some(authorizer) = &declaration.authorizer {
        middleware.push(MiddlewareName::authorize(authorizer.as_str()).to_string());
    }
    if let Some(validators) = &declaration.validators {
        middleware.push(MiddlewareName::validate(validators.as_str()).to_string());
    }
    middleware.extend(declaration.middleware.iter().cloned());
    middleware
}
