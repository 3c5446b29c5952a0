//! Route expansion checked against the in-memory route table.

use axum::http::Method;

use jsonapi_routes::routing::{
    RegistrarError, RegistryError, ResourceDeclaration, ResourceRegistrar, RouteTable,
};

mod common;
use common::*;

#[test]
fn test_basic() {
    let table = posts_table(ResourceDeclaration::new());
    assert_eq!(table.len(), 5);
    see_resource(&table);
    assert!(table.routes().all(|r| r.parameters.resource_type() == Some("posts")));
}

#[test]
fn test_has_one() {
    let table = posts_table(ResourceDeclaration::new().has_one("author"));
    see_resource(&table);
    see_has_one(&table, "author");
}

#[test]
fn test_multiple_has_one() {
    let table = posts_table(ResourceDeclaration::new().has_one(["author", "site"]));
    see_has_one(&table, "author");
    see_has_one(&table, "site");
}

#[test]
fn test_dasherized_has_one() {
    let table = posts_table(ResourceDeclaration::new().has_one(["last-comment"]));
    see_has_one(&table, "last-comment");
}

#[test]
fn test_has_many() {
    let table = posts_table(ResourceDeclaration::new().has_many("comments"));
    see_has_many(&table, "comments");
}

#[test]
fn test_multiple_has_many() {
    let table = posts_table(ResourceDeclaration::new().has_many(["comments", "tags"]));
    see_has_many(&table, "comments");
    see_has_many(&table, "tags");
}

#[test]
fn test_dasherized_has_many() {
    let table = posts_table(ResourceDeclaration::new().has_many("recent-comments"));
    see_has_many(&table, "recent-comments");
}

#[test]
fn test_all_relationships() {
    let table = posts_table(
        ResourceDeclaration::new()
            .has_one("author")
            .has_many(["comments", "tags"]),
    );
    assert_eq!(table.len(), 5 + 3 + 5 + 5);
    see_has_one(&table, "author");
    see_has_many(&table, "comments");
    see_has_many(&table, "tags");
}

#[test]
fn test_not_a_relationship() {
    let table = posts_table(
        ResourceDeclaration::new()
            .has_one("author")
            .has_many(["comments", "tags"]),
    );

    see_not_found(&table, Method::GET, "/posts/123/site");
    see_not_found(&table, Method::GET, "/posts/123/relationships/site");
    see_not_found(&table, Method::PATCH, "/posts/123/relationships/site");
    see_not_found(&table, Method::POST, "/posts/123/relationships/site");
    see_not_found(&table, Method::DELETE, "/posts/123/relationships/site");
}

#[test]
fn test_specified_controller() {
    let table = posts_table(
        ResourceDeclaration::new()
            .controller("App.PostsController")
            .has_one("author")
            .has_many("comments"),
    );

    see_resource(&table);
    see_has_one(&table, "author");
    see_has_many(&table, "comments");
    assert!(table.routes().all(|r| r.action.controller() == "App.PostsController"));
}

#[test]
fn test_specified_authorizer() {
    let table = posts_table(ResourceDeclaration::new().authorizer("App\\JsonApi\\GenericAuthorizer"));
    let matched = see_response(&table, Method::GET, "/posts", "index");
    assert!(matched
        .route
        .middleware
        .contains(&"json-api.authorize:App\\JsonApi\\GenericAuthorizer".to_string()));
}

#[test]
fn test_specified_validators() {
    let table = posts_table(
        ResourceDeclaration::new()
            .validators("App\\JsonApi\\GenericValidator")
            .has_many("comments"),
    );
    let matched = see_response(&table, Method::GET, "/posts", "index");
    assert!(matched
        .route
        .middleware
        .contains(&"json-api.validate:App\\JsonApi\\GenericValidator".to_string()));

    // Relationship routes carry the same middleware.
    let matched = see_response(&table, Method::DELETE, "/posts/123/relationships/comments", "remove-relationship:123:comments");
    assert_eq!(matched.route.middleware, vec!["json-api.validate:App\\JsonApi\\GenericValidator"]);
}

#[test]
fn test_several_resources_share_a_table() {
    let mut registrar = ResourceRegistrar::new(RouteTable::new()).with_prefix("/api");
    let total = registrar
        .resources([
            ("posts", ResourceDeclaration::new().has_one("author")),
            ("comments", ResourceDeclaration::new().has_one("post")),
        ])
        .unwrap();
    assert_eq!(total, 16);

    let table = registrar.into_inner();
    let matched = table.match_route(&Method::GET, "/api/comments/7/post").unwrap();
    assert_eq!(matched.parameters.resource_type(), Some("comments"));
    assert_eq!(matched.route.action.to_string(), "CommentsController@read_related");
    see_not_found(&table, Method::GET, "/posts");
}

#[test]
fn test_registering_twice_is_rejected() {
    let mut registrar = ResourceRegistrar::new(RouteTable::new());
    registrar.resource("posts", ResourceDeclaration::new()).unwrap();

    let err = registrar.resource("posts", ResourceDeclaration::new()).unwrap_err();
    assert_eq!(
        err,
        RegistrarError::Registry(RegistryError::Duplicate {
            method: Method::GET,
            path: "/posts".into(),
        })
    );
    assert_eq!(registrar.registry().len(), 5);
}

#[test]
fn test_invalid_declaration_registers_nothing() {
    let mut table = RouteTable::new();
    {
        let mut registrar = ResourceRegistrar::new(&mut table);
        let err = registrar
            .resource("posts", ResourceDeclaration::new().has_one("author").has_many("comments/new"))
            .unwrap_err();
        assert!(matches!(err, RegistrarError::InvalidSegment { .. }));
    }
    assert!(table.is_empty());
}
