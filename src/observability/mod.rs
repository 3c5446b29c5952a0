//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! registrar, route table, HTTP dispatch
//!     → tracing events (structured fields)
//!     → logging.rs subscriber (stdout)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - One `info` event per registered resource, `debug` per route
//! - HTTP spans come from tower_http's TraceLayer

pub mod logging;
