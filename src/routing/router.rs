//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the fixed route table
//! - Short-circuit `OPTIONS` to the preflight response
//! - Look up `"METHOD PATH"` and run the matched handler or the 404 handler
//!
//! # Design Decisions
//! - Immutable after construction (shared without locks)
//! - O(1) lookup via HashMap, registration order kept for listings
//! - Explicit NotFound rather than a silent default

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::Method;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::AppConfig;
use crate::http::response::{ApiResponse, ResponseBuilder};
use crate::routing::handlers;
use crate::routing::RouteKey;
use crate::security::SecurityHeaders;

/// A route handler.
pub type Handler = fn(&RouteContext<'_>) -> ApiResponse;

/// One entry of the route table.
#[derive(Debug, Clone)]
pub struct Route {
    key: RouteKey,
    description: &'static str,
    handler: Handler,
}

impl Route {
    pub fn new(key: RouteKey, description: &'static str, handler: Handler) -> Self {
        Self {
            key,
            description,
            handler,
        }
    }

    pub fn key(&self) -> &RouteKey {
        &self.key
    }

    pub fn description(&self) -> &'static str {
        self.description
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T12:30:00.000Z`.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Read-only view handed to handlers for one dispatch.
pub struct RouteContext<'a> {
    pub config: &'a AppConfig,
    pub responses: &'a ResponseBuilder,
    pub routes: &'a [Route],
    pub now: DateTime<Utc>,
}

impl RouteContext<'_> {
    pub fn timestamp(&self) -> String {
        format_timestamp(self.now)
    }

    /// Paths of the route table, in registration order.
    pub fn available_paths(&self) -> Vec<&str> {
        self.routes.iter().map(|route| route.key.path()).collect()
    }
}

/// Outcome of a route lookup.
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    Preflight,
    Matched(&'a Route),
    NotFound,
}

impl Resolution<'_> {
    /// Low-cardinality label for logs and metrics.
    pub fn label(&self) -> String {
        match self {
            Resolution::Preflight => "preflight".to_string(),
            Resolution::Matched(route) => route.key.to_string(),
            Resolution::NotFound => "not_found".to_string(),
        }
    }
}

/// The immutable route table.
#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
    index: HashMap<RouteKey, usize>,
    config: Arc<AppConfig>,
    responses: ResponseBuilder,
}

impl Router {
    /// Build the standard table for the given configuration.
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self::with_routes(config, handlers::standard_routes())
    }

    fn with_routes(config: Arc<AppConfig>, routes: Vec<Route>) -> Self {
        let index = routes
            .iter()
            .enumerate()
            .map(|(i, route)| (route.key.clone(), i))
            .collect();
        let responses =
            ResponseBuilder::new(SecurityHeaders::new(config.cors_allowed_origin.clone()));

        Self {
            routes,
            index,
            config,
            responses,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn resolve(&self, method: &Method, path: &str) -> Resolution<'_> {
        if method == Method::OPTIONS {
            return Resolution::Preflight;
        }
        match self.index.get(&RouteKey::new(method.clone(), path)) {
            Some(&i) => Resolution::Matched(&self.routes[i]),
            None => Resolution::NotFound,
        }
    }

    /// Resolve a method exactly as it arrived in the event.
    ///
    /// Strings that are not valid method tokens, and lower-case spellings of
    /// standard methods, never match a route.
    pub fn resolve_raw(&self, method: &str, path: &str) -> Resolution<'_> {
        match Method::from_bytes(method.as_bytes()) {
            Ok(method) => self.resolve(&method, path),
            Err(_) => Resolution::NotFound,
        }
    }

    /// Dispatch a request using the current time.
    pub fn dispatch(&self, method: &Method, path: &str) -> ApiResponse {
        self.dispatch_at(method, path, Utc::now())
    }

    pub fn dispatch_at(&self, method: &Method, path: &str, now: DateTime<Utc>) -> ApiResponse {
        self.dispatch_resolved(self.resolve(method, path), now)
    }

    /// Run the handler for an already resolved request.
    pub fn dispatch_resolved(&self, resolution: Resolution<'_>, now: DateTime<Utc>) -> ApiResponse {
        let ctx = self.context(now);
        match resolution {
            Resolution::Preflight => handlers::preflight(&ctx),
            Resolution::Matched(route) => (route.handler)(&ctx),
            Resolution::NotFound => handlers::not_found(&ctx),
        }
    }

    /// The generic 500 response.
    pub fn internal_error(&self, request_id: Option<&str>, now: DateTime<Utc>) -> ApiResponse {
        handlers::internal_error(&self.context(now), request_id)
    }

    fn context(&self, now: DateTime<Utc>) -> RouteContext<'_> {
        RouteContext {
            config: &self.config,
            responses: &self.responses,
            routes: &self.routes,
            now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> Router {
        Router::new(Arc::new(AppConfig::default()))
    }

    #[test]
    fn test_resolve() {
        let router = router();
        assert!(matches!(
            router.resolve(&Method::GET, "/hello"),
            Resolution::Matched(route) if route.key() == &RouteKey::get("/hello")
        ));
        assert!(matches!(
            router.resolve(&Method::OPTIONS, "/nowhere"),
            Resolution::Preflight
        ));
        assert!(matches!(
            router.resolve(&Method::POST, "/hello"),
            Resolution::NotFound
        ));
        assert!(matches!(
            router.resolve(&Method::GET, "/hello/"),
            Resolution::NotFound
        ));
    }

    #[test]
    fn test_resolve_raw() {
        let router = router();
        assert!(matches!(router.resolve_raw("GET", "/health"), Resolution::Matched(_)));
        assert!(matches!(router.resolve_raw("OPTIONS", "/x"), Resolution::Preflight));
        for method in ["", "GE T", "get", "options"] {
            assert!(
                matches!(router.resolve_raw(method, "/hello"), Resolution::NotFound),
                "{method:?} should not match"
            );
        }
    }

    #[test]
    fn test_table_is_get_only() {
        let router = router();
        assert_eq!(router.routes().len(), 3);
        assert!(router
            .routes()
            .iter()
            .all(|route| route.key().method() == Method::GET));
    }

    #[test]
    fn test_labels() {
        let router = router();
        assert_eq!(router.resolve(&Method::GET, "/").label(), "GET /");
        assert_eq!(router.resolve(&Method::OPTIONS, "/").label(), "preflight");
        assert_eq!(router.resolve(&Method::GET, "/x").label(), "not_found");
    }

    #[test]
    fn test_dispatch_statuses() {
        let router = router();
        assert_eq!(router.dispatch(&Method::GET, "/hello").status_code, 200);
        assert_eq!(router.dispatch(&Method::GET, "/health").status_code, 200);
        assert_eq!(router.dispatch(&Method::GET, "/").status_code, 200);
        assert_eq!(router.dispatch(&Method::OPTIONS, "/hello").status_code, 200);
        assert_eq!(router.dispatch(&Method::GET, "/does-not-exist").status_code, 404);
        assert_eq!(router.dispatch(&Method::DELETE, "/").status_code, 404);
    }

    #[test]
    fn test_configured_origin_on_every_response() {
        let config = AppConfig {
            cors_allowed_origin: "https://app.example.com".into(),
            ..AppConfig::default()
        };
        let router = Router::new(Arc::new(config));

        for (method, path) in [
            (Method::GET, "/hello"),
            (Method::OPTIONS, "/"),
            (Method::GET, "/missing"),
        ] {
            let response = router.dispatch(&method, path);
            assert_eq!(
                response.header("Access-Control-Allow-Origin"),
                Some("https://app.example.com")
            );
        }
        let response = router.internal_error(None, Utc::now());
        assert_eq!(
            response.header("Access-Control-Allow-Origin"),
            Some("https://app.example.com")
        );
    }
}
