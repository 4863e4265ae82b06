//! HTTP envelope handling subsystem.
//!
//! # Data Flow
//! ```text
//! Platform event (JSON)
//!     → request.rs (extract method, path, source IP, request ID)
//!     → [routing decides the handler]
//!     → response.rs (build envelope, merge security headers)
//!     → Platform response { statusCode, headers, body }
//!
//! Local development:
//!     HTTP request → server.rs → event → ... → envelope → HTTP response
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{InvocationEvent, InvocationRequest, RequestError, X_REQUEST_ID};
pub use response::{ApiResponse, ResponseBody, ResponseBuilder};
pub use server::LocalServer;
