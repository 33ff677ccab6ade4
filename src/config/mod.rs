//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `QUOTER` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment yields a working setup
//! against a local backend.
//!
//! # Example
//!
//! ```no_run
//! use construction_quoter::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Pricing service at {}", config.pricing.base_url);
//! ```

mod email;
mod error;
mod export;
mod pricing;
mod runtime;
mod share;

pub use email::EmailConfig;
pub use error::{ConfigError, ConfigValidationError};
pub use export::{ExportConfig, RendererKind};
pub use pricing::PricingConfig;
pub use runtime::{Environment, RuntimeConfig};
pub use share::ShareConfig;

use serde::Deserialize;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "QUOTER";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Environment and log filter
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Remote pricing calculator
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Document export
    #[serde(default)]
    pub export: ExportConfig,

    /// WhatsApp hand-off
    #[serde(default)]
    pub share: ShareConfig,

    /// Quote email relay
    #[serde(default)]
    pub email: EmailConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `QUOTER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `QUOTER__PRICING__BASE_URL=https://api.example.com` -> `pricing.base_url`
    /// - `QUOTER__EMAIL__ENABLED=true` -> `email.enabled = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` for the first invalid value found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.pricing.validate()?;
        self.export.validate()?;
        self.share.validate()?;
        self.email.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.runtime.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "QUOTER__RUNTIME__ENVIRONMENT",
        "QUOTER__PRICING__BASE_URL",
        "QUOTER__PRICING__TIMEOUT_SECS",
        "QUOTER__PRICING__API_TOKEN",
        "QUOTER__EXPORT__RENDERER",
        "QUOTER__EMAIL__ENABLED",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.pricing.base_url, "http://localhost:8000");
        assert_eq!(config.export.renderer, RendererKind::Print);
        assert!(!config.email.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("QUOTER__PRICING__BASE_URL", "https://pricing.example.com");
        env::set_var("QUOTER__PRICING__TIMEOUT_SECS", "10");
        env::set_var("QUOTER__PRICING__API_TOKEN", "tok_123");
        env::set_var("QUOTER__EXPORT__RENDERER", "remote");
        env::set_var("QUOTER__EMAIL__ENABLED", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.pricing.base_url, "https://pricing.example.com");
        assert_eq!(config.pricing.timeout_secs, 10);
        assert_eq!(
            config.pricing.api_token.as_ref().map(|t| t.expose_secret().as_str()),
            Some("tok_123")
        );
        assert_eq!(config.export.renderer, RendererKind::Remote);
        assert!(config.email.enabled);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("QUOTER__RUNTIME__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }

    #[test]
    fn test_load_validated_rejects_bad_timeout() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("QUOTER__PRICING__TIMEOUT_SECS", "0");
        let result = AppConfig::load_validated();
        clear_env();

        assert!(matches!(
            result,
            Err(ConfigError::ValidationFailed(ConfigValidationError::InvalidTimeout))
        ));
    }
}
