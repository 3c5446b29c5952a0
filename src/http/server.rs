//! Axum integration.
//!
//! # Responsibilities
//! - Accept route registrations and build an Axum `Router` from them
//! - Resolve controller and middleware identifiers through the handler registry
//! - Wire authorizers, validators and named middleware as route layers
//! - Serve the router with graceful shutdown
//!
//! # Design Decisions
//! - Identifiers are resolved at registration; an unknown name fails startup
//! - All methods of one path share a single `MethodRouter`, so Axum answers
//!   404 for undeclared paths and 405 for undeclared methods
//! - The outermost layer decodes path parameters and buffers the body once
//!   into a [`RequestContext`] request extension
//! - Middleware runs in declaration order and stops at the first rejection

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{rejection::PathRejection, Path, State},
    http::{Method, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{MethodFilter, MethodRouter},
    Extension, Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::http::handlers::{
    Authorizer, Controller, HandlerRegistry, Middleware, RequestContext, Validator,
};
use crate::http::response::Rejection;
use crate::routing::{
    Action, MiddlewareName, RegistryError, RouteParameters, RouteRegistration, RouteRegistry,
};

/// Default request body limit: 2MB.
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// What every request to one registration starts from.
#[derive(Debug)]
struct RouteBinding {
    action: Action,
    parameters: RouteParameters,
    body_limit: usize,
}

/// A resolved middleware name.
enum Stage {
    Authorize(Arc<dyn Authorizer>),
    Validate(Arc<dyn Validator>),
    Named(Arc<dyn Middleware>),
}

impl Stage {
    fn wrap(self, endpoint: MethodRouter) -> MethodRouter {
        match self {
            Stage::Authorize(authorizer) => {
                endpoint.route_layer(middleware::from_fn_with_state(authorizer, authorize))
            }
            Stage::Validate(validator) => {
                endpoint.route_layer(middleware::from_fn_with_state(validator, validate))
            }
            Stage::Named(named) => {
                endpoint.route_layer(middleware::from_fn_with_state(named, run_named))
            }
        }
    }
}

/// Build the request context: bound parameters plus the decoded path
/// parameters, and the buffered body.
async fn bind_context(
    State(binding): State<Arc<RouteBinding>>,
    captured: Result<Path<HashMap<String, String>>, PathRejection>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Path(captured) = match captured {
        Ok(captured) => captured,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Invalid path parameters");
            return Rejection::bad_request(rejection.body_text()).into_response();
        }
    };

    let mut parameters = binding.parameters.clone();
    for (name, value) in captured {
        parameters.insert(name, value);
    }

    let (mut parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, binding.body_limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "Failed to read request body");
            return Rejection::payload_too_large().into_response();
        }
    };

    parts.extensions.insert(RequestContext {
        method: parts.method.clone(),
        action: binding.action,
        parameters,
        headers: parts.headers.clone(),
        body: body.clone(),
    });
    next.run(Request::from_parts(parts, Body::from(body))).await
}

/// Run `check` against the request context, passing on to `next` on success.
async fn check_then(
    request: Request<Body>,
    next: Next,
    check: impl FnOnce(&RequestContext) -> Result<(), Rejection>,
) -> Response {
    let outcome = match request.extensions().get::<RequestContext>() {
        Some(ctx) => check(ctx),
        None => Err(Rejection::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")),
    };

    match outcome {
        Ok(()) => next.run(request).await,
        Err(rejection) => {
            tracing::debug!(status = %rejection.status, "Request rejected by middleware");
            rejection.into_response()
        }
    }
}

async fn authorize(
    State(authorizer): State<Arc<dyn Authorizer>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    check_then(request, next, |ctx| authorizer.authorize(ctx)).await
}

async fn validate(
    State(validator): State<Arc<dyn Validator>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    check_then(request, next, |ctx| validator.validate(ctx)).await
}

async fn run_named(
    State(named): State<Arc<dyn Middleware>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    named.call(request, next).await
}

/// Routing engine that builds an Axum `Router`.
#[derive(Debug)]
pub struct AxumRegistry {
    handlers: HandlerRegistry,
    /// Path pattern -> (method router, methods registered so far).
    paths: Vec<(String, MethodRouter, Vec<Method>)>,
    body_limit: usize,
}

impl AxumRegistry {
    pub fn new(handlers: HandlerRegistry) -> Self {
        Self {
            handlers,
            paths: Vec::new(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Maximum request body size handed to handlers.
    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    /// Build the Axum router with all middleware layers.
    pub fn into_router(self) -> Router {
        self.paths
            .into_iter()
            .fold(Router::new(), |router, (path, method_router, _)| {
                router.route(&path, method_router)
            })
            .layer(TraceLayer::new_for_http())
    }

    /// Resolve every identifier of `route` and build its layered endpoint.
    fn endpoint(&self, route: &RouteRegistration, filter: MethodFilter) -> Result<MethodRouter, RegistryError> {
        let controller_name = route.action.controller();
        let controller: Arc<dyn Controller> = self
            .handlers
            .controller(controller_name)
            .ok_or_else(|| RegistryError::Unresolved {
                kind: "controller",
                name: controller_name.to_string(),
            })?;

        let stages = route
            .middleware
            .iter()
            .map(|name| match MiddlewareName::parse(name) {
                MiddlewareName::Authorize(id) => self
                    .handlers
                    .authorizer(&id)
                    .map(Stage::Authorize)
                    .ok_or(RegistryError::Unresolved { kind: "authorizer", name: id }),
                MiddlewareName::Validate(id) => self
                    .handlers
                    .validator(&id)
                    .map(Stage::Validate)
                    .ok_or(RegistryError::Unresolved { kind: "validator", name: id }),
                MiddlewareName::Other(other) => self
                    .handlers
                    .middleware(&other)
                    .map(Stage::Named)
                    .ok_or(RegistryError::Unresolved { kind: "middleware", name: other }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let handler = move |Extension(ctx): Extension<RequestContext>| controller.handle(ctx);

        // The last layer added runs first: stages go on innermost-first so
        // they run in declaration order, and the context binding goes on last.
        let endpoint = stages
            .into_iter()
            .rev()
            .fold(MethodRouter::new().on(filter, handler), |endpoint, stage| {
                stage.wrap(endpoint)
            });

        let binding = Arc::new(RouteBinding {
            action: route.action.action(),
            parameters: route.parameters.clone(),
            body_limit: self.body_limit,
        });
        Ok(endpoint.route_layer(middleware::from_fn_with_state(binding, bind_context)))
    }
}

impl RouteRegistry for AxumRegistry {
    fn register(&mut self, route: RouteRegistration) -> Result<(), RegistryError> {
        let filter = MethodFilter::try_from(route.method.clone()).map_err(|_| {
            RegistryError::Unresolved {
                kind: "method",
                name: route.method.to_string(),
            }
        })?;

        let endpoint = self.endpoint(&route, filter)?;

        let index = match self.paths.iter().position(|(path, _, _)| *path == route.path) {
            Some(index) => {
                if self.paths[index].2.contains(&route.method) {
                    return Err(RegistryError::Duplicate {
                        method: route.method,
                        path: route.path,
                    });
                }
                index
            }
            None => {
                self.paths.push((route.path.clone(), MethodRouter::new(), Vec::new()));
                self.paths.len() - 1
            }
        };

        let (_, method_router, methods) = &mut self.paths[index];
        *method_router = std::mem::replace(method_router, MethodRouter::new()).merge(endpoint);
        methods.push(route.method);
        Ok(())
    }
}

/// Serve `router` on `listener` until Ctrl+C.
pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "HTTP server starting");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
