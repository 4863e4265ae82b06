//! Security subsystem.
//!
//! Only response hardening lives here. Rate limiting and WAF are handled by
//! the hosting platform and appear in responses as descriptive labels only.

pub mod headers;

pub use headers::SecurityHeaders;
