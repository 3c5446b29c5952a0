//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! RouteRegistration[] (from the registrar)
//!     → server.rs (AxumRegistry: resolve names, group methods per path)
//!     → handlers.rs (controllers, authorizers, validators by name)
//!     → axum::Router
//!
//! Incoming request
//!     → axum (404 unknown path / 405 unknown method)
//!     → request context layer (decoded path parameters, buffered body)
//!     → authorizer, validator, named middleware layers
//!       (response.rs renders rejections)
//!     → controller
//! ```

pub mod handlers;
pub mod response;
pub mod server;

pub use handlers::{
    AllowAll, Authorizer, Controller, EchoController, HandlerRegistry, Middleware, RequestContext,
    Validator,
};
pub use response::{Rejection, JSON_API_MEDIA_TYPE};
pub use server::{serve, AxumRegistry, DEFAULT_BODY_LIMIT};
