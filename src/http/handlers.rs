//! Named handlers resolved when routes are wired.
//!
//! # Responsibilities
//! - Define the controller, authorizer, validator and middleware seams
//! - Map the identifiers carried by routes to implementations
//!
//! # Design Decisions
//! - Populated explicitly at application wiring time, no reflection
//! - Implementations are shared `Arc` trait objects
//! - Plain closures can act as authorizers, validators and middleware
//! - Middleware finds the [`RequestContext`] in the request extensions

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;

use crate::http::response::Rejection;
use crate::routing::{Action, RouteParameters};

/// Everything a handler sees about a matched request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub action: Action,
    /// Bound route parameters plus the captured resource id.
    pub parameters: RouteParameters,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RequestContext {
    pub fn resource_type(&self) -> &str {
        self.parameters.resource_type().unwrap_or_default()
    }

    pub fn resource_id(&self) -> Option<&str> {
        self.parameters.resource_id()
    }

    pub fn relationship_name(&self) -> Option<&str> {
        self.parameters.relationship_name()
    }
}

/// Serves the actions of one or more resources.
pub trait Controller: Send + Sync {
    fn handle(&self, ctx: RequestContext) -> BoxFuture<'static, Response>;
}

/// Decides whether a request may proceed.
pub trait Authorizer: Send + Sync {
    fn authorize(&self, ctx: &RequestContext) -> Result<(), Rejection>;
}

/// Checks the request document before the controller runs.
pub trait Validator: Send + Sync {
    fn validate(&self, ctx: &RequestContext) -> Result<(), Rejection>;
}

/// Named middleware listed after the authorizer and validators, e.g.
/// `throttle`. It may answer the request itself or pass it on to `next`.
pub trait Middleware: Send + Sync {
    fn call(&self, request: Request<Body>, next: Next) -> BoxFuture<'static, Response>;
}

impl<F> Authorizer for F
where
    F: Fn(&RequestContext) -> Result<(), Rejection> + Send + Sync,
{
    fn authorize(&self, ctx: &RequestContext) -> Result<(), Rejection> {
        self(ctx)
    }
}

impl<F> Validator for F
where
    F: Fn(&RequestContext) -> Result<(), Rejection> + Send + Sync,
{
    fn validate(&self, ctx: &RequestContext) -> Result<(), Rejection> {
        self(ctx)
    }
}

impl<F, Fut> Middleware for F
where
    F: Fn(Request<Body>, Next) -> Fut + Send + Sync,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, request: Request<Body>, next: Next) -> BoxFuture<'static, Response> {
        Box::pin(self(request, next))
    }
}

/// Controller answering with a plain-text description of the action, e.g.
/// `read:123` or `read-related:123:author`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoController;

impl EchoController {
    pub fn describe(ctx: &RequestContext) -> String {
        let mut out = ctx.action.as_str().to_string();
        if let Some(id) = ctx.resource_id() {
            out.push(':');
            out.push_str(id);
        }
        if let Some(name) = ctx.relationship_name() {
            out.push(':');
            out.push_str(name);
        }
        out
    }
}

impl Controller for EchoController {
    fn handle(&self, ctx: RequestContext) -> BoxFuture<'static, Response> {
        let body = Self::describe(&ctx);
        Box::pin(async move { body.into_response() })
    }
}

/// Authorizer, validator and middleware that lets every request through.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn authorize(&self, _ctx: &RequestContext) -> Result<(), Rejection> {
        Ok(())
    }
}

impl Validator for AllowAll {
    fn validate(&self, _ctx: &RequestContext) -> Result<(), Rejection> {
        Ok(())
    }
}

impl Middleware for AllowAll {
    fn call(&self, request: Request<Body>, next: Next) -> BoxFuture<'static, Response> {
        Box::pin(next.run(request))
    }
}

/// Lookup table from identifiers to handler implementations.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    controllers: HashMap<String, Arc<dyn Controller>>,
    authorizers: HashMap<String, Arc<dyn Authorizer>>,
    validators: HashMap<String, Arc<dyn Validator>>,
    middleware: HashMap<String, Arc<dyn Middleware>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_controller(mut self, name: impl Into<String>, controller: impl Controller + 'static) -> Self {
        self.controllers.insert(name.into(), Arc::new(controller));
        self
    }

    pub fn with_authorizer(mut self, name: impl Into<String>, authorizer: impl Authorizer + 'static) -> Self {
        self.authorizers.insert(name.into(), Arc::new(authorizer));
        self
    }

    pub fn with_validator(mut self, name: impl Into<String>, validator: impl Validator + 'static) -> Self {
        self.validators.insert(name.into(), Arc::new(validator));
        self
    }

    pub fn with_middleware(mut self, name: impl Into<String>, middleware: impl Middleware + 'static) -> Self {
        self.middleware.insert(name.into(), Arc::new(middleware));
        self
    }

    pub fn controller(&self, name: &str) -> Option<Arc<dyn Controller>> {
        self.controllers.get(name).cloned()
    }

    pub fn authorizer(&self, name: &str) -> Option<Arc<dyn Authorizer>> {
        self.authorizers.get(name).cloned()
    }

    pub fn validator(&self, name: &str) -> Option<Arc<dyn Validator>> {
        self.validators.get(name).cloned()
    }

    pub fn middleware(&self, name: &str) -> Option<Arc<dyn Middleware>> {
        self.middleware.get(name).cloned()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("controllers", &self.controllers.keys().collect::<Vec<_>>())
            .field("authorizers", &self.authorizers.keys().collect::<Vec<_>>())
            .field("validators", &self.validators.keys().collect::<Vec<_>>())
            .field("middleware", &self.middleware.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{RELATIONSHIP_NAME, RESOURCE_ID, RESOURCE_TYPE};

    fn context(action: Action, params: &[(&str, &str)]) -> RequestContext {
        RequestContext {
            method: action.http_method(),
            action,
            parameters: params.iter().copied().collect(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    #[test]
    fn test_echo_description() {
        let ctx = context(Action::Index, &[(RESOURCE_TYPE, "posts")]);
        assert_eq!(EchoController::describe(&ctx), "index");

        let ctx = context(Action::Update, &[(RESOURCE_TYPE, "posts"), (RESOURCE_ID, "123")]);
        assert_eq!(EchoController::describe(&ctx), "update:123");

        let ctx = context(
            Action::ReadRelated,
            &[(RESOURCE_TYPE, "posts"), (RESOURCE_ID, "123"), (RELATIONSHIP_NAME, "author")],
        );
        assert_eq!(EchoController::describe(&ctx), "read-related:123:author");
        assert_eq!(ctx.resource_type(), "posts");
    }

    #[test]
    fn test_registry_lookup() {
        let registry = HandlerRegistry::new()
            .with_controller("PostsController", EchoController)
            .with_authorizer("deny", |_: &RequestContext| Err::<(), _>(Rejection::forbidden()));

        assert!(registry.controller("PostsController").is_some());
        assert!(registry.controller("CommentsController").is_none());

        let deny = registry.authorizer("deny").unwrap();
        let ctx = context(Action::Index, &[(RESOURCE_TYPE, "posts")]);
        assert_eq!(deny.authorize(&ctx), Err(Rejection::forbidden()));
        assert!(registry.validator("deny").is_none());
        assert!(registry.middleware("deny").is_none());

        let registry = registry.with_middleware("throttle", AllowAll);
        assert!(registry.middleware("throttle").is_some());
    }
}
