//! Route handlers.
//!
//! Every handler is a plain function of the route context. None of them can
//! fail; the only error path lives in the invocation entry.

use axum::http::StatusCode;
use serde_json::{json, Map, Value};

use crate::http::response::{ApiResponse, ResponseBody, TEXT_PLAIN};
use crate::routing::router::{Route, RouteContext};
use crate::routing::RouteKey;

pub const WELCOME_MESSAGE: &str = "Hello Hexaware DevOps Test - Secured Serverless Edition";
pub const ARCHITECTURE: &str = "AWS Lambda + API Gateway + WAF";

/// The fixed route table, in registration order.
pub fn standard_routes() -> Vec<Route> {
    vec![
        Route::new(
            RouteKey::get("/hello"),
            "Public - Returns OK as per requirements",
            hello,
        ),
        Route::new(RouteKey::get("/health"), "Public - Health check", health),
        Route::new(RouteKey::get("/"), "Public - This endpoint", root),
    ]
}

/// CORS preflight for any path.
pub fn preflight(ctx: &RouteContext<'_>) -> ApiResponse {
    ctx.responses
        .build_with_content_type(StatusCode::OK, ResponseBody::empty(), TEXT_PLAIN)
}

pub fn hello(ctx: &RouteContext<'_>) -> ApiResponse {
    ctx.responses
        .build_with_content_type(StatusCode::OK, "OK", TEXT_PLAIN)
}

pub fn health(ctx: &RouteContext<'_>) -> ApiResponse {
    ctx.responses.build(
        StatusCode::OK,
        json!({
            "status": "healthy",
            "timestamp": ctx.timestamp(),
            "version": ctx.config.health_version(),
            "environment": ctx.config.environment,
            "security": "enabled",
        }),
    )
}

/// Service description. The `security` block is informational only.
pub fn root(ctx: &RouteContext<'_>) -> ApiResponse {
    let endpoints: Map<String, Value> = ctx
        .routes
        .iter()
        .map(|route| {
            (
                route.key().path().to_string(),
                Value::from(route.description()),
            )
        })
        .collect();

    ctx.responses.build(
        StatusCode::OK,
        json!({
            "message": WELCOME_MESSAGE,
            "endpoints": endpoints,
            "timestamp": ctx.timestamp(),
            "architecture": ARCHITECTURE,
            "version": ctx.config.root_version(),
            "security": {
                "waf": "enabled",
                "rateLimit": ctx.config.rate_limit_label,
                "headers": "security headers applied",
                "authentication": "not required - public endpoints",
            },
        }),
    )
}

pub fn not_found(ctx: &RouteContext<'_>) -> ApiResponse {
    ctx.responses.build(
        StatusCode::NOT_FOUND,
        json!({
            "error": "Not Found",
            "message": "The requested resource was not found",
            "timestamp": ctx.timestamp(),
            "availableEndpoints": ctx.available_paths(),
        }),
    )
}

/// Generic failure report. Never includes the underlying error.
pub fn internal_error(ctx: &RouteContext<'_>, request_id: Option<&str>) -> ApiResponse {
    ctx.responses.build(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({
            "error": "Internal Server Error",
            "message": "An unexpected error occurred while processing the request",
            "timestamp": ctx.timestamp(),
            "requestId": request_id.unwrap_or("unknown"),
        }),
    )
}
