//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use serverless_router::config::AppConfig;
use serverless_router::http::InvocationEvent;
use serverless_router::{Function, LocalServer};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A function with default configuration.
pub fn function() -> Function {
    Function::new(Arc::new(AppConfig::default()))
}

/// A well-formed platform event, shaped like API Gateway's.
pub fn event(method: &str, path: &str) -> Value {
    InvocationEvent::new(method, path)
        .with_source_ip("127.0.0.1")
        .with_request_id("test-request-id")
        .to_value()
}

/// Start a local server on an ephemeral port.
///
/// Dropping or firing the returned sender stops the server.
#[allow(dead_code)]
pub async fn start_local_server(config: AppConfig) -> (SocketAddr, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let server = LocalServer::new(Arc::new(Function::new(Arc::new(config))), Duration::from_secs(5));
    tokio::spawn(async move {
        let _ = server
            .serve(listener, async move {
                let _ = rx.await;
            })
            .await;
    });

    (addr, tx)
}
