//! Invocation entry point.
//!
//! Turns one platform event into one response envelope. Extraction failures
//! are caught here, once, and reported as a generic 500.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde_json::Value;

use crate::config::AppConfig;
use crate::http::request::{request_id_hint, InvocationRequest};
use crate::http::response::ApiResponse;
use crate::observability::{logging, metrics};
use crate::routing::router::format_timestamp;
use crate::routing::Router;

/// The function: an immutable router plus its configuration.
#[derive(Debug)]
pub struct Function {
    router: Router,
}

impl Function {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            router: Router::new(config),
        }
    }

    /// Handle one raw invocation event.
    pub fn handle_event(&self, event: Value) -> ApiResponse {
        let start = Instant::now();
        let now = Utc::now();
        let request_id = request_id_hint(&event);

        let request = match InvocationRequest::from_event(event) {
            Ok(request) => request,
            Err(e) => {
                tracing::error!(
                    request_id = request_id.as_deref().unwrap_or("unknown"),
                    error = %e,
                    "Failed to process invocation"
                );
                let response = self.router.internal_error(request_id.as_deref(), now);
                metrics::record_request("UNKNOWN", response.status_code, "error", start);
                return response;
            }
        };

        logging::log_invocation(&request, &format_timestamp(now));

        let resolution = self.router.resolve_raw(&request.method, &request.path);
        let route = resolution.label();
        let response = self.router.dispatch_resolved(resolution, now);

        tracing::debug!(
            request_id = request.request_id.as_deref().unwrap_or("unknown"),
            route = %route,
            status = response.status_code,
            "Invocation complete"
        );
        metrics::record_request(&request.method, response.status_code, &route, start);

        response
    }
}
