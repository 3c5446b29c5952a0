//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     resource type + ResourceDeclaration
//!     → declaration.rs (normalize relationship names)
//!     → registrar.rs (expand into RouteRegistration[])
//!     → RouteRegistry (RouteTable, AxumRegistry, ...)
//!
//! Incoming Request (method, path):
//!     → router.rs (route lookup)
//!     → matcher.rs (evaluate path patterns)
//!     → Return: matched route, NotFound or MethodNotAllowed
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime
//! - Relationship routes use literal names, never a wildcard segment
//! - Controllers and middleware are referenced by name only
//! - Deterministic: same declaration always yields the same routes

pub mod declaration;
pub mod error;
pub mod matcher;
pub mod middleware;
pub mod registrar;
pub mod route;
pub mod router;

pub use declaration::{Relationship, RelationshipKind, RelationshipNames, ResourceDeclaration};
pub use error::{MatchError, RegistrarError, RegistryError};
pub use middleware::{MiddlewareName, AUTHORIZE_TAG, VALIDATE_TAG};
pub use registrar::ResourceRegistrar;
pub use route::{
    Action, ActionIdentifier, RouteParameters, RouteRegistration, RouteRegistry,
    RELATIONSHIP_NAME, RESOURCE_ID, RESOURCE_TYPE,
};
pub use router::{RouteMatch, RouteTable};
