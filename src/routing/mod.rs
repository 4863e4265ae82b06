//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! (method, path)
//!     → router.rs (OPTIONS short-circuit, table lookup)
//!     → matcher.rs (exact "METHOD PATH" key)
//!     → handlers.rs (build the response)
//!
//! Route table (at startup):
//!     handlers::standard_routes()
//!     → index by RouteKey
//!     → freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes built once per process, immutable at runtime
//! - Exact matching only
//! - Deterministic: same input always produces the same route

pub mod handlers;
pub mod matcher;
pub mod router;

pub use matcher::RouteKey;
pub use router::{Resolution, Route, RouteContext, Router};
