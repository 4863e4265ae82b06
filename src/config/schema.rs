//! Configuration schema definitions.
//!
//! All types derive Serde traits so a TOML file can supply any subset of
//! fields; environment overrides are applied on top by the loader.

use serde::{Deserialize, Serialize};

/// Version reported by `GET /health` when no version is configured.
pub const DEFAULT_HEALTH_VERSION: &str = "1.0.0";

/// Version reported by `GET /` when no version is configured.
pub const DEFAULT_ROOT_VERSION: &str = "1.1.0";

/// Root configuration for the function.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version string. When unset each endpoint reports its
    /// historical default.
    pub version: Option<String>,

    /// Deployment environment label.
    pub environment: String,

    /// Value of `Access-Control-Allow-Origin`.
    pub cors_allowed_origin: String,

    /// Descriptive rate-limit label shown on the root endpoint. Not enforced.
    pub rate_limit_label: String,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: None,
            environment: "serverless".to_string(),
            cors_allowed_origin: "*".to_string(),
            rate_limit_label: "100 req/s".to_string(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// Version reported by the health endpoint.
    pub fn health_version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_HEALTH_VERSION)
    }

    /// Version reported by the root endpoint.
    pub fn root_version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_ROOT_VERSION)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single line output.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}
