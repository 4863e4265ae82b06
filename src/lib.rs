//! Stateless HTTP router for a serverless function.
//!
//! # Architecture Overview
//!
//! ```text
//!   Platform event ──▶ function ──▶ http::request ──▶ routing::router ──▶ routing::handlers
//!                          │                                                   │
//!                          │                                                   ▼
//!   Platform response ◀────┴──────────────────────────────────────────── http::response
//!                                                                     (+ security headers)
//! ```
//!
//! `main.rs` hosts [`Function`] on the Lambda runtime; `bin/serve-local.rs`
//! puts the same function behind an axum server for development.

pub mod config;
pub mod function;
pub mod http;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::AppConfig;
pub use function::Function;
pub use http::{ApiResponse, LocalServer};
