//! JSON:API resource route registration.
//!
//! Expands compact resource declarations (`posts` with a has-one `author`
//! and has-many `comments`) into the full set of JSON:API resource and
//! relationship routes, and registers them into a routing engine.

pub mod config;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::schema::RoutesConfig;
pub use http::{AxumRegistry, HandlerRegistry};
pub use routing::{ResourceDeclaration, ResourceRegistrar, RouteTable};
