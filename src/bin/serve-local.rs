use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use serverless_router::config::load_config;
use serverless_router::observability::{logging::init_logging, metrics::init_metrics};
use serverless_router::{Function, LocalServer};

#[derive(Parser)]
#[command(name = "serve-local")]
#[command(about = "Run the serverless router behind a local HTTP server", long_about = None)]
struct Cli {
    /// Address to listen on.
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Optional TOML config file; environment variables still take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Expose Prometheus metrics on this address.
    #[arg(long)]
    metrics_address: Option<SocketAddr>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    request_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.observability, true)?;

    tracing::info!(
        environment = %config.environment,
        request_timeout_secs = cli.request_timeout_secs,
        "Configuration loaded"
    );

    if let Some(addr) = cli.metrics_address {
        init_metrics(addr)?;
    }

    let function = Arc::new(Function::new(Arc::new(config)));
    let server = LocalServer::new(function, Duration::from_secs(cli.request_timeout_secs));

    let listener = TcpListener::bind(cli.bind).await?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
