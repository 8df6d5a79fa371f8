//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and formats (host, warehouse path, port)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("databricks.host must not include a scheme; use the bare hostname")]
    HostHasScheme,

    #[error("databricks.host is not a valid hostname (got {0:?})")]
    InvalidHost(String),

    #[error("databricks.warehouse_http_path must start with /sql/ (got {0:?})")]
    BadWarehousePath(String),

    #[error("databricks.ai_endpoint must not be empty")]
    EmptyAiEndpoint,

    #[error("databricks.volume_path must start with /Volumes/ (got {0:?})")]
    BadVolumePath(String),

    #[error("server.port must be nonzero")]
    ZeroPort,

    #[error("chat.history_limit must be nonzero")]
    ZeroHistoryLimit,

    #[error("tables.{0} must not be empty")]
    EmptyTableName(&'static str),
}

/// Check the loaded configuration for semantic problems.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let host = &config.databricks.host;
    if host.starts_with("http://") || host.starts_with("https://") {
        errors.push(ValidationError::HostHasScheme);
    } else if !host.is_empty() && !is_bare_hostname(host) {
        errors.push(ValidationError::InvalidHost(host.clone()));
    }

    if !config.databricks.warehouse_http_path.starts_with("/sql/") {
        errors.push(ValidationError::BadWarehousePath(
            config.databricks.warehouse_http_path.clone(),
        ));
    }

    if config.databricks.ai_endpoint.is_empty() {
        errors.push(ValidationError::EmptyAiEndpoint);
    }

    if !config.databricks.volume_path.starts_with("/Volumes/") {
        errors.push(ValidationError::BadVolumePath(
            config.databricks.volume_path.clone(),
        ));
    }

    if config.server.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    if config.chat.history_limit == 0 {
        errors.push(ValidationError::ZeroHistoryLimit);
    }

    for (name, value) in [
        ("parsed", &config.tables.parsed),
        ("endpoint_response", &config.tables.endpoint_response),
        ("pricing_features", &config.tables.pricing_features),
    ] {
        if value.is_empty() {
            errors.push(ValidationError::EmptyTableName(name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// True when prefixing a scheme yields a URL whose host is the whole
/// value. Rejects embedded paths, ports, and credentials.
fn is_bare_hostname(host: &str) -> bool {
    url::Url::parse(&format!("https://{host}"))
        .map(|u| u.host_str() == Some(host) && u.path() == "/")
        .unwrap_or(false)
}
