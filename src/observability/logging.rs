//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Pick text or JSON output from config
//! - Emit the per-invocation access line
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level when present
//! - JSON output for log aggregation, text for local development

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};
use crate::http::request::InvocationRequest;

/// Install the global subscriber.
///
/// `ansi` only affects text output; turn it off where the log sink is not a
/// terminal.
pub fn init_logging(config: &ObservabilityConfig, ansi: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init(),
        LogFormat::Text => registry.with(text_layer(ansi)).try_init(),
    }
}

fn text_layer<S>(ansi: bool) -> fmt::Layer<S> {
    fmt::layer().with_ansi(ansi)
}

/// One diagnostic line per invocation.
pub fn log_invocation(request: &InvocationRequest, timestamp: &str) {
    tracing::info!(
        timestamp = %timestamp,
        method = %request.method,
        path = %request.path,
        source_ip = request.source_ip.as_deref().unwrap_or("unknown"),
        "Invocation received"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn render(ansi: bool) -> String {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::registry()
            .with(text_layer(ansi).with_writer(move || writer.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(path = "/hello", "Invocation received");
        });
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_plain_text_has_no_escape_codes() {
        let output = render(false);
        assert!(output.contains("Invocation received"));
        assert!(!output.contains('\u{1b}'), "{output:?}");
    }

    #[test]
    fn test_ansi_text_is_colored() {
        assert!(render(true).contains('\u{1b}'));
    }
}
