//! Mock pricing service for testing.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Simulated latency for single-flight testing
//! - Error injection
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let service = MockPricingService::new()
//!     .with_response(sample_quote_payload())
//!     .with_delay(Duration::from_millis(100));
//!
//! let body = service.detailed_quote(&request, Uuid::new_v4()).await?;
//! assert_eq!(service.call_count(), 1);
//! ```

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use uuid::Uuid;

use crate::domain::quote::{FlowKind, QuoteRequest};
use crate::ports::{PricingError, PricingService};

/// A recorded call.
#[derive(Debug, Clone)]
pub struct MockPricingCall {
    pub flow: FlowKind,
    pub request: QuoteRequest,
    pub request_id: Uuid,
}

/// Mock pricing service.
///
/// When the queue is empty it answers with [`sample_estimate_payload`] or
/// [`sample_quote_payload`] depending on the flow.
#[derive(Debug, Clone, Default)]
pub struct MockPricingService {
    responses: Arc<Mutex<VecDeque<Result<Value, PricingError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<MockPricingCall>>>,
}

impl MockPricingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a successful response body to the queue.
    pub fn with_response(self, body: Value) -> Self {
        self.responses.lock().push_back(Ok(body));
        self
    }

    /// Adds an error to the queue.
    pub fn with_error(self, error: PricingError) -> Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this service.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<MockPricingCall> {
        self.calls.lock().clone()
    }

    async fn respond(
        &self,
        flow: FlowKind,
        request: &QuoteRequest,
        request_id: Uuid,
    ) -> Result<Value, PricingError> {
        self.calls.lock().push(MockPricingCall {
            flow,
            request: request.clone(),
            request_id,
        });

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let queued = self.responses.lock().pop_front();
        queued.unwrap_or_else(|| {
            Ok(match flow {
                FlowKind::QuickEstimate => sample_estimate_payload(),
                FlowKind::DetailedQuote => sample_quote_payload(),
            })
        })
    }
}

#[async_trait]
impl PricingService for MockPricingService {
    async fn quick_estimate(
        &self,
        request: &QuoteRequest,
        request_id: Uuid,
    ) -> Result<Value, PricingError> {
        self.respond(FlowKind::QuickEstimate, request, request_id).await
    }

    async fn detailed_quote(
        &self,
        request: &QuoteRequest,
        request_id: Uuid,
    ) -> Result<Value, PricingError> {
        self.respond(FlowKind::DetailedQuote, request, request_id).await
    }
}

/// A quick-estimate body in the shape the calculator returns it.
pub fn sample_estimate_payload() -> Value {
    json!({
        "success": true,
        "estimation": {
            "area": "120 m²",
            "construction_type": "residential",
            "usage_type": "vivienda",
            "finish_level": "standard",
            "floors": 1,
            "location": "mendoza",
            "estimated_cost": "U$D 187,200",
            "estimated_time": "5 - 6 meses"
        },
        "timestamp": "2024-03-15T12:00:00"
    })
}

/// A detailed-quote body in the shape the calculator returns it.
pub fn sample_quote_payload() -> Value {
    json!({
        "success": true,
        "quote": {
            "client_name": "Ana Pérez",
            "client_email": "ana@example.com",
            "client_phone": "+54 9 261 555 0000",
            "construction_type": "residential",
            "usage_type": "vivienda",
            "finish_level": "standard",
            "area": "120 m²",
            "floors": 1,
            "location": "mendoza",
            "total_cost": "U$D 187,200",
            "estimated_time": "5 - 6 meses",
            "breakdown": [
                { "category": "Estructura Básica", "cost": "U$D 74,880", "percentage": 40 },
                { "category": "Materiales", "cost": "U$D 56,160", "percentage": 30 },
                { "category": "Mano de Obra", "cost": "U$D 37,440", "percentage": 20 },
                { "category": "Instalaciones", "cost": "U$D 18,720", "percentage": 10 }
            ],
            "quote_date": "15/03/2024",
            "valid_until": "14/04/2024"
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::FormFields;

    fn request() -> QuoteRequest {
        QuoteRequest::from_form(&FormFields::new())
    }

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let service = MockPricingService::new()
            .with_response(json!({"n": 1}))
            .with_error(PricingError::status(500, "boom"));

        let first = service.detailed_quote(&request(), Uuid::new_v4()).await;
        let second = service.detailed_quote(&request(), Uuid::new_v4()).await;

        assert_eq!(first.unwrap(), json!({"n": 1}));
        assert_eq!(second.unwrap_err(), PricingError::status(500, "boom"));
    }

    #[tokio::test]
    async fn falls_back_to_sample_payload_per_flow() {
        let service = MockPricingService::new();

        let estimate = service.quick_estimate(&request(), Uuid::new_v4()).await.unwrap();
        let quote = service.detailed_quote(&request(), Uuid::new_v4()).await.unwrap();

        assert!(estimate.get("estimation").is_some());
        assert!(quote.get("quote").is_some());
    }

    #[tokio::test]
    async fn tracks_calls_with_flow_and_request_id() {
        let service = MockPricingService::new();
        let id = Uuid::new_v4();

        service.quick_estimate(&request(), id).await.unwrap();

        let calls = service.calls();
        assert_eq!(service.call_count(), 1);
        assert_eq!(calls[0].flow, FlowKind::QuickEstimate);
        assert_eq!(calls[0].request_id, id);
    }

    #[tokio::test]
    async fn respects_delay() {
        let service = MockPricingService::new().with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        service.quick_estimate(&request(), Uuid::new_v4()).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
