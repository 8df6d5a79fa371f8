//! Configuration loading from disk and environment.

use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration, apply environment overrides, and validate.
///
/// `path = None` starts from the built-in defaults, which is the normal
/// case for Databricks deployments where everything arrives via the
/// environment.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p)?;
            toml::from_str(&content)?
        }
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay deployment environment variables onto a loaded config.
///
/// The lookup is injected so tests can exercise overrides without
/// mutating process-wide state.
pub fn apply_env_overrides<F>(config: &mut AppConfig, get: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = get("DATABRICKS_HOST") {
        config.databricks.host = host;
    }
    if let Some(path) = get("DATABRICKS_WAREHOUSE_HTTP_PATH") {
        config.databricks.warehouse_http_path = path;
    }
    if let Some(endpoint) = get("DATABRICKS_AI_ENDPOINT") {
        config.databricks.ai_endpoint = endpoint;
    }
    if let Some(token) = get("DATABRICKS_TOKEN") {
        if !token.is_empty() {
            config.databricks.token = Some(token);
        }
    }
    if let Some(port) = get("PORT") {
        config.server.port = port
            .parse()
            .map_err(|source| ConfigError::InvalidPort {
                value: port.clone(),
                source,
            })?;
    }
    Ok(())
}
