//! Shared helpers for the integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use jsonapi_routes::http::{AxumRegistry, EchoController, HandlerRegistry};
use jsonapi_routes::routing::{
    MatchError, ResourceDeclaration, ResourceRegistrar, RouteMatch, RouteTable,
};

/// Register `posts` with `declaration` into a fresh route table.
pub fn posts_table(declaration: ResourceDeclaration) -> RouteTable {
    let mut registrar = ResourceRegistrar::new(RouteTable::new());
    registrar.resource("posts", declaration).unwrap();
    registrar.into_inner()
}

/// Assert `method path` matches and the echoed action equals `expected`.
pub fn see_response<'a>(table: &'a RouteTable, method: Method, path: &str, expected: &str) -> RouteMatch<'a> {
    let matched = table
        .match_route(&method, path)
        .unwrap_or_else(|e| panic!("{method} {path}: {e}"));

    let mut echoed = matched.route.action.action().as_str().to_string();
    if let Some(id) = matched.parameters.resource_id() {
        echoed = format!("{echoed}:{id}");
    }
    if let Some(name) = matched.parameters.relationship_name() {
        echoed = format!("{echoed}:{name}");
    }
    assert_eq!(echoed, expected, "{method} {path}");
    assert_eq!(matched.parameters.resource_type(), Some("posts"), "resource type");
    matched
}

pub fn see_resource(table: &RouteTable) {
    see_response(table, Method::GET, "/posts", "index");
    see_response(table, Method::POST, "/posts", "create");
    see_response(table, Method::GET, "/posts/123", "read:123");
    see_response(table, Method::PATCH, "/posts/123", "update:123");
    see_response(table, Method::DELETE, "/posts/123", "delete:123");
}

pub fn see_has_one(table: &RouteTable, relationship: &str) {
    see_response(table, Method::GET, &format!("/posts/123/{relationship}"), &format!("read-related:123:{relationship}"));
    let path = format!("/posts/123/relationships/{relationship}");
    see_response(table, Method::GET, &path, &format!("read-relationship:123:{relationship}"));
    see_response(table, Method::PATCH, &path, &format!("replace-relationship:123:{relationship}"));

    // Must not have been registered as a has-many.
    see_method_not_allowed(table, Method::POST, &path);
    see_method_not_allowed(table, Method::DELETE, &path);
}

pub fn see_has_many(table: &RouteTable, relationship: &str) {
    see_response(table, Method::GET, &format!("/posts/123/{relationship}"), &format!("read-related:123:{relationship}"));
    let path = format!("/posts/123/relationships/{relationship}");
    see_response(table, Method::GET, &path, &format!("read-relationship:123:{relationship}"));
    see_response(table, Method::PATCH, &path, &format!("replace-relationship:123:{relationship}"));
    see_response(table, Method::POST, &path, &format!("add-relationship:123:{relationship}"));
    see_response(table, Method::DELETE, &path, &format!("remove-relationship:123:{relationship}"));
}

pub fn see_not_found(table: &RouteTable, method: Method, path: &str) {
    match table.match_route(&method, path) {
        Err(MatchError::NotFound { .. }) => {}
        other => panic!("{method} {path}: expected not found, got {other:?}"),
    }
}

pub fn see_method_not_allowed(table: &RouteTable, method: Method, path: &str) {
    match table.match_route(&method, path) {
        Err(MatchError::MethodNotAllowed { .. }) => {}
        other => panic!("{method} {path}: expected method not allowed, got {other:?}"),
    }
}

/// Build an Axum router for `posts` served by the echo controller.
pub fn posts_router(handlers: HandlerRegistry, declaration: ResourceDeclaration) -> Router {
    let handlers = handlers.with_controller("PostsController", EchoController);
    let mut registrar = ResourceRegistrar::new(AxumRegistry::new(handlers));
    registrar.resource("posts", declaration).unwrap();
    registrar.into_inner().into_router()
}

/// Send a request through `router`, returning status and body text.
pub async fn send(router: &Router, method: Method, uri: &str) -> (StatusCode, String) {
    send_with_body(router, method, uri, Body::empty()).await
}

pub async fn send_with_body(router: &Router, method: Method, uri: &str, body: Body) -> (StatusCode, String) {
    let request = Request::builder().method(method).uri(uri).body(body).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
