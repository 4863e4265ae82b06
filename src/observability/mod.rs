//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! function.rs / http::server
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Platform log capture (stdout)
//!     → Metrics endpoint (Prometheus scrape, local server only)
//! ```

pub mod logging;
pub mod metrics;
