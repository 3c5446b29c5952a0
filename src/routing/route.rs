//! Route registration records.
//!
//! # Responsibilities
//! - Name the controller actions a JSON:API resource exposes
//! - Carry one (method, path, action, parameters, middleware) tuple per route
//! - Define the registration contract routing engines implement
//!
//! # Design Decisions
//! - Actions are referenced by identifier only; resolution happens elsewhere
//! - Bound parameters are constants fixed at registration time
//! - Registration is fallible so engines can refuse duplicates

use std::collections::BTreeMap;
use std::fmt;

use axum::http::Method;

use crate::routing::error::RegistryError;

/// Route parameter bound to the resource type on every route.
pub const RESOURCE_TYPE: &str = "resource_type";

/// Route parameter bound to the relationship name on relationship routes.
pub const RELATIONSHIP_NAME: &str = "relationship_name";

/// Path parameter holding the resource id.
pub const RESOURCE_ID: &str = "id";

/// Controller actions for a resource and its relationships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Index,
    Create,
    Read,
    Update,
    Delete,
    ReadRelated,
    ReadRelationship,
    ReplaceRelationship,
    AddRelationship,
    RemoveRelationship,
}

impl Action {
    /// Method name on the controller the action is bound to.
    pub fn method_name(&self) -> &'static str {
        match self {
            Action::Index => "index",
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::ReadRelated => "read_related",
            Action::ReadRelationship => "read_relationship",
            Action::ReplaceRelationship => "replace_relationship",
            Action::AddRelationship => "add_to_relationship",
            Action::RemoveRelationship => "remove_from_relationship",
        }
    }

    /// Short display name, e.g. `read-related`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Index => "index",
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::ReadRelated => "read-related",
            Action::ReadRelationship => "read-relationship",
            Action::ReplaceRelationship => "replace-relationship",
            Action::AddRelationship => "add-relationship",
            Action::RemoveRelationship => "remove-relationship",
        }
    }

    /// HTTP method the action is served on.
    pub fn http_method(&self) -> Method {
        match self {
            Action::Index | Action::Read | Action::ReadRelated | Action::ReadRelationship => {
                Method::GET
            }
            Action::Create | Action::AddRelationship => Method::POST,
            Action::Update | Action::ReplaceRelationship => Method::PATCH,
            Action::Delete | Action::RemoveRelationship => Method::DELETE,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a controller action, rendered as `Controller@method`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionIdentifier {
    controller: String,
    action: Action,
}

impl ActionIdentifier {
    pub fn new(controller: impl Into<String>, action: Action) -> Self {
        Self {
            controller: controller.into(),
            action,
        }
    }

    pub fn controller(&self) -> &str {
        &self.controller
    }

    pub fn action(&self) -> Action {
        self.action
    }
}

impl fmt::Display for ActionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.controller, self.action.method_name())
    }
}

/// Named route parameters.
///
/// Holds the constants bound at registration and, once a request matched,
/// the values captured from the path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParameters(BTreeMap<String, String>);

impl RouteParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.get(RESOURCE_TYPE)
    }

    pub fn resource_id(&self) -> Option<&str> {
        self.get(RESOURCE_ID)
    }

    pub fn relationship_name(&self) -> Option<&str> {
        self.get(RELATIONSHIP_NAME)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A single route handed to a routing engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRegistration {
    pub method: Method,
    /// Path pattern with `{name}` placeholders, e.g. `/posts/{id}`.
    pub path: String,
    pub action: ActionIdentifier,
    pub parameters: RouteParameters,
    /// Middleware names in the order they run.
    pub middleware: Vec<String>,
}

/// Registration side of a routing engine.
pub trait RouteRegistry {
    /// Add a route to the engine's table.
    fn register(&mut self, route: RouteRegistration) -> Result<(), RegistryError>;
}

impl<R: RouteRegistry + ?Sized> RouteRegistry for &mut R {
    fn register(&mut self, route: RouteRegistration) -> Result<(), RegistryError> {
        (**self).register(route)
    }
}

impl RouteRegistry for Vec<RouteRegistration> {
    fn register(&mut self, route: RouteRegistration) -> Result<(), RegistryError> {
        self.push(route);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_identifier_display() {
        let id = ActionIdentifier::new("PostsController", Action::AddRelationship);
        assert_eq!(id.to_string(), "PostsController@add_to_relationship");
        assert_eq!(id.action().to_string(), "add-relationship");
    }

    #[test]
    fn test_action_methods() {
        assert_eq!(Action::Index.http_method(), Method::GET);
        assert_eq!(Action::Create.http_method(), Method::POST);
        assert_eq!(Action::ReplaceRelationship.http_method(), Method::PATCH);
        assert_eq!(Action::RemoveRelationship.http_method(), Method::DELETE);
    }

    #[test]
    fn test_parameters_accessors() {
        let params: RouteParameters = [(RESOURCE_TYPE, "posts"), (RESOURCE_ID, "123")]
            .into_iter()
            .collect();
        assert_eq!(params.resource_type(), Some("posts"));
        assert_eq!(params.resource_id(), Some("123"));
        assert_eq!(params.relationship_name(), None);
        assert_eq!(params.len(), 2);
    }
}
