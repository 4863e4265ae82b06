//! Configuration loading.
//!
//! Defaults, then an optional TOML file, then environment variables. The
//! result is validated before it is handed out.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{AppConfig, LogFormat};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_VAR: &str = "ROUTER_CONFIG";

pub const VERSION_VAR: &str = "APP_VERSION";
pub const ENVIRONMENT_VAR: &str = "APP_ENVIRONMENT";
pub const CORS_ORIGIN_VAR: &str = "CORS_ALLOWED_ORIGIN";
pub const RATE_LIMIT_VAR: &str = "RATE_LIMIT_LABEL";
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {message}")]
    Env { var: &'static str, message: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from the process environment.
///
/// `path` takes precedence over `ROUTER_CONFIG` when both are given.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Load configuration with an explicit variable lookup.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let file_path = path
        .map(Path::to_path_buf)
        .or_else(|| lookup(CONFIG_PATH_VAR).map(PathBuf::from));

    let mut config = match file_path {
        Some(path) => load_file(&path)?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config, &lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn load_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

fn apply_env_overrides<F>(config: &mut AppConfig, lookup: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(version) = lookup(VERSION_VAR) {
        config.version = Some(version);
    }
    if let Some(environment) = lookup(ENVIRONMENT_VAR) {
        config.environment = environment;
    }
    if let Some(origin) = lookup(CORS_ORIGIN_VAR) {
        config.cors_allowed_origin = origin;
    }
    if let Some(label) = lookup(RATE_LIMIT_VAR) {
        config.rate_limit_label = label;
    }
    if let Some(level) = lookup(LOG_LEVEL_VAR) {
        config.observability.log_level = level;
    }
    if let Some(format) = lookup(LOG_FORMAT_VAR) {
        config.observability.log_format = format
            .parse::<LogFormat>()
            .map_err(|message| ConfigError::Env {
                var: LOG_FORMAT_VAR,
                message,
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = load_config_with(None, env(&[])).unwrap();
        assert_eq!(config.environment, "serverless");
        assert!(config.version.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = load_config_with(
            None,
            env(&[
                (VERSION_VAR, "9.9.9"),
                (ENVIRONMENT_VAR, "prod"),
                (CORS_ORIGIN_VAR, "https://app.example.com"),
                (RATE_LIMIT_VAR, "50 req/s"),
                (LOG_FORMAT_VAR, "json"),
            ]),
        )
        .unwrap();
        assert_eq!(config.health_version(), "9.9.9");
        assert_eq!(config.environment, "prod");
        assert_eq!(config.cors_allowed_origin, "https://app.example.com");
        assert_eq!(config.rate_limit_label, "50 req/s");
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_env_wins_over_file() {
        let path = std::env::temp_dir().join(format!(
            "serverless-router-config-{}.toml",
            std::process::id()
        ));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "environment = \"from-file\"\nrate_limit_label = \"1 req/s\"").unwrap();

        let config = load_config_with(
            None,
            env(&[
                (CONFIG_PATH_VAR, path.to_str().unwrap()),
                (ENVIRONMENT_VAR, "from-env"),
            ]),
        )
        .unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.environment, "from-env");
        assert_eq!(config.rate_limit_label, "1 req/s");
    }

    #[test]
    fn test_missing_file() {
        let err = load_config_with(Some(Path::new("/nonexistent/router.toml")), env(&[]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_invalid_log_format() {
        let err = load_config_with(None, env(&[(LOG_FORMAT_VAR, "yaml")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: LOG_FORMAT_VAR, .. }));
    }

    #[test]
    fn test_invalid_cors_origin_rejected() {
        let err = load_config_with(None, env(&[(CORS_ORIGIN_VAR, "bad\u{7f}origin")]))
            .unwrap_err();
        assert!(err.to_string().starts_with("Validation failed"));
    }
}
