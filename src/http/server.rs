//! Local development server.
//!
//! # Responsibilities
//! - Accept real HTTP requests with axum
//! - Translate each request into an invocation event
//! - Write the response envelope back as an HTTP response
//! - Wire up middleware (tracing, timeout, request ID)
//!
//! The function itself never sees axum types; this module only plays the
//! role the hosting platform plays in production.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::function::Function;
use crate::http::request::InvocationEvent;
use crate::http::response::ApiResponse;
use crate::http::X_REQUEST_ID;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub function: Arc<Function>,
}

/// HTTP front end for running the function locally.
pub struct LocalServer {
    router: Router,
}

impl LocalServer {
    pub fn new(function: Arc<Function>, request_timeout: Duration) -> Self {
        let state = AppState { function };
        Self {
            router: Self::build_router(state, request_timeout),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState, request_timeout: Duration) -> Router {
        Router::new()
            .fallback(invoke_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// The configured axum router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until Ctrl+C.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve until `shutdown` completes.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Local server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Local server stopped");
        Ok(())
    }
}

/// Every request goes through the function; routing happens there.
async fn invoke_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut event = InvocationEvent::new(request.method().as_str(), request.uri().path())
        .with_request_id(request_id);
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        event = event.with_source_ip(addr.ip().to_string());
    }

    into_http_response(state.function.handle_event(event.to_value()))
}

/// Convert an envelope into an HTTP response.
pub fn into_http_response(envelope: ApiResponse) -> Response {
    let mut builder = Response::builder().status(envelope.status());
    for (name, value) in &envelope.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    match builder.body(Body::from(envelope.body)) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Envelope is not a valid HTTP response");
            (StatusCode::INTERNAL_SERVER_ERROR, "Invalid response envelope").into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
