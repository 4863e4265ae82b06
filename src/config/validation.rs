//! Configuration validation.
//!
//! Semantic checks that serde cannot express. Every failing field is
//! reported, not just the first.

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} is not a valid header value: {value:?}")]
    InvalidHeaderValue { field: &'static str, value: String },

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
}

/// Validate a loaded configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(version) = &config.version {
        if version.trim().is_empty() {
            errors.push(ValidationError::Empty { field: "version" });
        }
    }

    if config.environment.trim().is_empty() {
        errors.push(ValidationError::Empty { field: "environment" });
    }

    if config.cors_allowed_origin.is_empty() {
        errors.push(ValidationError::Empty {
            field: "cors_allowed_origin",
        });
    } else if HeaderValue::from_str(&config.cors_allowed_origin).is_err() {
        errors.push(ValidationError::InvalidHeaderValue {
            field: "cors_allowed_origin",
            value: config.cors_allowed_origin.clone(),
        });
    }

    if config
        .observability
        .log_level
        .parse::<tracing::Level>()
        .is_err()
    {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.environment = "  ".into();
        config.cors_allowed_origin = "https://a.example\n".into();
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::Empty {
            field: "environment"
        }));
        assert!(errors.contains(&ValidationError::UnknownLogLevel("loud".into())));
    }

    #[test]
    fn test_blank_version_rejected() {
        let config = AppConfig {
            version: Some(String::new()),
            ..AppConfig::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::Empty { field: "version" }]);
    }
}
