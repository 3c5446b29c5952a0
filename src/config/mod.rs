//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RoutesConfig (validated, immutable)
//!     → declarations fed to the ResourceRegistrar at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; routes are registered once
//! - All fields have defaults to allow minimal configs
//! - Unknown keys in a resource entry are rejected, not ignored
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ObservabilityConfig, ResourceConfig, RoutesConfig, ServerConfig};
pub use validation::{validate_config, ValidationError};
