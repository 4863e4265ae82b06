//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! AppConfig::default()
//!     → loader.rs (optional TOML file, then environment overrides)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → shared via Arc with the router and server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a new cold start picks up changes
//! - All fields have defaults so an empty environment is a valid deployment
//! - Environment variables always win over file values

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AppConfig, LogFormat, ObservabilityConfig};
