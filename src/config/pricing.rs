//! Pricing service configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::{check_http_url, check_path, ConfigValidationError};

/// Pricing service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// Scheme, host and port of the backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Quick-estimate endpoint
    #[serde(default = "default_estimate_path")]
    pub estimate_path: String,

    /// Detailed-quote endpoint
    #[serde(default = "default_quote_path")]
    pub quote_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional bearer token
    pub api_token: Option<Secret<String>>,
}

impl PricingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate pricing configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        check_http_url(&self.base_url, "pricing base")?;
        check_path(&self.estimate_path, "estimate")?;
        check_path(&self.quote_path, "quote")?;
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            estimate_path: default_estimate_path(),
            quote_path: default_quote_path(),
            timeout_secs: default_timeout_secs(),
            api_token: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_estimate_path() -> String {
    "/api/construction/estimate".to_string()
}

fn default_quote_path() -> String {
    "/api/construction/quote".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
