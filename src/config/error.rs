//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ConfigValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("Invalid {0} URL: must start with http:// or https://")]
    InvalidUrl(&'static str),

    #[error("Invalid request timeout: must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("Invalid {0} path: must be non-empty and start with '/'")]
    InvalidPath(&'static str),

    #[error("Invalid WhatsApp number: needs at least 8 digits")]
    InvalidWhatsAppNumber,

    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),
}

/// Shared checks used by every section.
pub(crate) fn check_http_url(
    value: &str,
    name: &'static str,
) -> Result<(), ConfigValidationError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigValidationError::InvalidUrl(name))
    }
}

pub(crate) fn check_path(value: &str, name: &'static str) -> Result<(), ConfigValidationError> {
    if value.len() > 1 && value.starts_with('/') {
        Ok(())
    } else {
        Err(ConfigValidationError::InvalidPath(name))
    }
}
