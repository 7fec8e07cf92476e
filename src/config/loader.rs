//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::JourneysConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<JourneysConfig, ConfigError> {
    let config: JourneysConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<JourneysConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogFormat;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.openapi.title, "Journeys API");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.http.max_body_bytes, 1024 * 1024);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_document_overrides_fields() {
        let config = parse_config(
            r#"
            [openapi]
            title = "Journeys"
            version = "v1.2.3"

            [http]
            max_body_bytes = 4096

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.openapi.title, "Journeys");
        assert_eq!(config.openapi.version, "v1.2.3");
        assert_eq!(config.http.max_body_bytes, 4096);
        assert_eq!(config.http.request_timeout_secs, 30);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let err = parse_config("[http\nmax_body_bytes = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_semantic_error_is_validation_error() {
        let err = parse_config("[http]\nmax_body_bytes = 0").unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors[0].field, "http.max_body_bytes"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/journeys.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
