//! HTTP Pricing Service - reqwest client for the construction calculator.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpPricingConfig::new("http://localhost:8000")
//!     .with_timeout(Duration::from_secs(30))
//!     .with_api_token(token);
//!
//! let service = HttpPricingService::new(config)?;
//! ```
//!
//! Both endpoints take the same JSON body (the serialized [`QuoteRequest`])
//! and are called exactly once per submission; there are no retries.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

use crate::adapters::http_client::{build_client, endpoint_url, REQUEST_ID_HEADER};
use crate::domain::quote::QuoteRequest;
use crate::ports::{PricingError, PricingService};

/// Default quick-estimate endpoint.
pub const DEFAULT_ESTIMATE_PATH: &str = "/api/construction/estimate";
/// Default detailed-quote endpoint.
pub const DEFAULT_QUOTE_PATH: &str = "/api/construction/quote";

/// Configuration for the HTTP pricing service.
#[derive(Debug, Clone)]
pub struct HttpPricingConfig {
    /// Scheme, host and port of the pricing backend.
    pub base_url: String,
    pub estimate_path: String,
    pub quote_path: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Optional bearer token.
    api_token: Option<Secret<String>>,
}

impl HttpPricingConfig {
    /// Creates a configuration with default endpoints and a 30s timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            estimate_path: DEFAULT_ESTIMATE_PATH.to_string(),
            quote_path: DEFAULT_QUOTE_PATH.to_string(),
            timeout: Duration::from_secs(30),
            api_token: None,
        }
    }

    /// Overrides both endpoint paths.
    pub fn with_paths(
        mut self,
        estimate_path: impl Into<String>,
        quote_path: impl Into<String>,
    ) -> Self {
        self.estimate_path = estimate_path.into();
        self.quote_path = quote_path.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sends `Authorization: Bearer <token>` on every call.
    pub fn with_api_token(mut self, token: Secret<String>) -> Self {
        self.api_token = Some(token);
        self
    }

    fn api_token(&self) -> Option<&str> {
        self.api_token.as_ref().map(|t| t.expose_secret().as_str())
    }
}

/// Pricing service backed by the remote HTTP calculator.
pub struct HttpPricingService {
    config: HttpPricingConfig,
    client: Client,
}

impl HttpPricingService {
    /// Creates the service; fails only if the TLS backend cannot initialize.
    pub fn new(config: HttpPricingConfig) -> Result<Self, PricingError> {
        let client = build_client(config.timeout)
            .map_err(|e| PricingError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn estimate_url(&self) -> String {
        endpoint_url(&self.config.base_url, &self.config.estimate_path)
    }

    pub fn quote_url(&self) -> String {
        endpoint_url(&self.config.base_url, &self.config.quote_path)
    }

    async fn post(
        &self,
        url: String,
        request: &QuoteRequest,
        request_id: Uuid,
    ) -> Result<Value, PricingError> {
        tracing::debug!(%url, %request_id, "Calling pricing service");

        let mut builder = self
            .client
            .post(&url)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(request);

        if let Some(token) = self.config.api_token() {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| self.map_send_error(e))?;
        let response = self.handle_response_status(response).await?;

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        serde_json::from_str(&body)
            .map_err(|e| PricingError::invalid_body(format!("Failed to parse response: {}", e)))
    }

    /// Turns every non-2xx status into [`PricingError::Status`], keeping the body.
    async fn handle_response_status(&self, response: Response) -> Result<Response, PricingError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(PricingError::status(status.as_u16(), error_body))
    }

    fn map_send_error(&self, e: reqwest::Error) -> PricingError {
        if e.is_timeout() {
            PricingError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            PricingError::network(format!("Connection failed: {}", e))
        } else {
            PricingError::network(e.to_string())
        }
    }
}

#[async_trait]
impl PricingService for HttpPricingService {
    async fn quick_estimate(
        &self,
        request: &QuoteRequest,
        request_id: Uuid,
    ) -> Result<Value, PricingError> {
        self.post(self.estimate_url(), request, request_id).await
    }

    async fn detailed_quote(
        &self,
        request: &QuoteRequest,
        request_id: Uuid,
    ) -> Result<Value, PricingError> {
        self.post(self.quote_url(), request, request_id).await
    }
}
