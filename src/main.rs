//! Lambda entry point.
//!
//! Builds the function once per cold start and serves every invocation from
//! the same immutable router.

use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

use serverless_router::config::load_config;
use serverless_router::observability::logging::init_logging;
use serverless_router::{ApiResponse, Function};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = load_config(None)?;
    // CloudWatch stores raw bytes, so no color codes.
    init_logging(&config.observability, false)?;

    tracing::info!(
        version = config.version.as_deref().unwrap_or("default"),
        environment = %config.environment,
        cors_allowed_origin = %config.cors_allowed_origin,
        "serverless-router v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let function = Arc::new(Function::new(Arc::new(config)));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let function = Arc::clone(&function);
        async move { Ok::<ApiResponse, Error>(function.handle_event(event.payload)) }
    }))
    .await
}
