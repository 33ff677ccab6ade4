//! Pricing Service Port - the remote calculator behind both flows.
//!
//! The calculator is opaque: it receives a [`QuoteRequest`] and answers with
//! loosely-typed JSON. Shaping that JSON is the normalizer's job, so the port
//! hands the body back untouched.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::quote::{FlowKind, QuoteRequest};

/// Port for the remote pricing calculator.
///
/// # Contract
///
/// Implementations must:
/// - Send the request as a JSON body
/// - Treat any non-2xx status as [`PricingError::Status`]
/// - Return the parsed JSON body on success, whatever its shape
/// - Never retry on their own
#[async_trait]
pub trait PricingService: Send + Sync {
    /// Coarse cost and time from the minimal field set.
    async fn quick_estimate(
        &self,
        request: &QuoteRequest,
        request_id: Uuid,
    ) -> Result<Value, PricingError>;

    /// Full calculation with an itemized breakdown.
    async fn detailed_quote(
        &self,
        request: &QuoteRequest,
        request_id: Uuid,
    ) -> Result<Value, PricingError>;
}

/// Calls the endpoint that belongs to `flow`.
pub async fn calculate(
    service: &dyn PricingService,
    flow: FlowKind,
    request: &QuoteRequest,
    request_id: Uuid,
) -> Result<Value, PricingError> {
    match flow {
        FlowKind::QuickEstimate => service.quick_estimate(request, request_id).await,
        FlowKind::DetailedQuote => service.detailed_quote(request, request_id).await,
    }
}

/// Transport-level failures talking to the pricing service.
///
/// `Display` carries the technical detail for logs; users only ever see
/// [`FlowKind::failure_message`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Connection refused, DNS failure, reset, etc.
    #[error("network error: {0}")]
    Network(String),

    /// No response within the configured timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The service answered with a non-success status.
    #[error("pricing service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// A success status whose body is not JSON.
    #[error("response body is not valid JSON: {0}")]
    InvalidBody(String),
}

impl PricingError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::InvalidBody(message.into())
    }

    /// HTTP status, when the service answered at all.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_keeps_detail_for_logs() {
        let err = PricingError::status(500, "Error interno del servidor");
        assert_eq!(err.http_status(), Some(500));
        assert!(err.to_string().contains("Error interno del servidor"));
    }

    #[test]
    fn non_status_errors_have_no_http_status() {
        assert_eq!(PricingError::network("refused").http_status(), None);
        assert_eq!(PricingError::Timeout { timeout_secs: 5 }.http_status(), None);
        assert_eq!(PricingError::invalid_body("eof").http_status(), None);
    }
}
