//! QuotePipeline - orchestrates the quick-estimate and detailed-quote flows.
//!
//! ```text
//! trigger -> latch -> Validating -> (Idle on rejection)
//!                  -> Submitting -> pricing call -> normalize
//!                  -> Success | Failed -> Idle -> latch released
//! ```
//!
//! The pipeline is the single owner of the current results. Export and share
//! collaborators read them through [`QuotePipeline::current_estimate`] and
//! [`QuotePipeline::current_quote`].

use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::Instrument;
use uuid::Uuid;

use super::events::{DismissReason, NoticeLevel, PipelineEvent};
use crate::domain::foundation::StateMachine;
use crate::domain::quote::{
    normalize_estimate, normalize_quote, validate_for, Estimate, FlowKind, FlowState, FormErrors,
    FormFields, Quote, QuoteRequest,
};
use crate::ports::{calculate, PricingError, PricingService};

/// Buffered events per subscriber before the slowest one starts lagging.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// How a trigger ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    /// A result was normalized, stored and shown.
    Completed,
    /// The form did not pass validation; no request was made.
    Invalid(FormErrors),
    /// The pricing call failed.
    Failed(PricingError),
    /// The same flow was already in flight; the trigger was ignored.
    AlreadyInFlight,
}

impl FlowOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, FlowOutcome::Completed)
    }
}

/// Per-flow latch and lifecycle state.
#[derive(Debug, Default)]
struct FlowSlot {
    in_flight: AtomicBool,
    state: Mutex<FlowState>,
}

/// Releases the in-flight latch when the trigger finishes or is dropped.
struct InFlightGuard<'a> {
    slot: &'a FlowSlot,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        // A cancelled trigger can leave the slot mid-flow.
        *self.slot.state.lock() = FlowState::Idle;
        self.slot.in_flight.store(false, Ordering::Release);
    }
}

/// Orchestrator for both calculation flows.
///
/// # Dependencies
///
/// - `PricingService`: remote calculator
///
/// # Usage
///
/// ```rust,ignore
/// let pipeline = QuotePipeline::new(Arc::new(pricing));
/// let mut events = pipeline.subscribe();
/// let outcome = pipeline.submit_detailed_quote(&fields).await;
/// ```
pub struct QuotePipeline {
    pricing: Arc<dyn PricingService>,
    events: broadcast::Sender<PipelineEvent>,
    estimate_slot: FlowSlot,
    quote_slot: FlowSlot,
    current_estimate: RwLock<Option<Estimate>>,
    current_quote: RwLock<Option<Quote>>,
    visible: RwLock<Option<FlowKind>>,
}

impl QuotePipeline {
    pub fn new(pricing: Arc<dyn PricingService>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            pricing,
            events,
            estimate_slot: FlowSlot::default(),
            quote_slot: FlowSlot::default(),
            current_estimate: RwLock::new(None),
            current_quote: RwLock::new(None),
            visible: RwLock::new(None),
        }
    }

    /// Subscribe to UI events. Events sent before subscribing are not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.events.subscribe()
    }

    /// Quick-estimate trigger: minimal validation, then one pricing call.
    pub async fn request_quick_estimate(&self, fields: &FormFields) -> FlowOutcome {
        self.run(FlowKind::QuickEstimate, fields).await
    }

    /// Form submit: full validation, then one pricing call.
    pub async fn submit_detailed_quote(&self, fields: &FormFields) -> FlowOutcome {
        self.run(FlowKind::DetailedQuote, fields).await
    }

    /// Closes the result view. The stored result stays available to export
    /// and share. Returns false when no result view was visible.
    pub fn dismiss_result(&self, reason: DismissReason) -> bool {
        let Some(flow) = self.visible.write().take() else {
            return false;
        };
        tracing::debug!(%flow, ?reason, "Result view dismissed");
        self.emit(PipelineEvent::ResultDismissed { flow, reason });
        true
    }

    /// Flow whose result view is currently visible.
    pub fn visible_result(&self) -> Option<FlowKind> {
        *self.visible.read()
    }

    pub fn flow_state(&self, flow: FlowKind) -> FlowState {
        *self.slot(flow).state.lock()
    }

    pub fn is_in_flight(&self, flow: FlowKind) -> bool {
        self.slot(flow).in_flight.load(Ordering::Acquire)
    }

    pub fn current_estimate(&self) -> Option<Estimate> {
        self.current_estimate.read().clone()
    }

    pub fn current_quote(&self) -> Option<Quote> {
        self.current_quote.read().clone()
    }

    /// Whether `flow` has produced a result that can be exported or shared.
    pub fn has_result(&self, flow: FlowKind) -> bool {
        match flow {
            FlowKind::QuickEstimate => self.current_estimate.read().is_some(),
            FlowKind::DetailedQuote => self.current_quote.read().is_some(),
        }
    }

    /// Publishes a toast for the UI.
    pub fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        self.emit(PipelineEvent::Notice {
            level,
            message: message.into(),
        });
    }

    async fn run(&self, flow: FlowKind, fields: &FormFields) -> FlowOutcome {
        let slot = self.slot(flow);
        if slot
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(%flow, "Flow already in flight, ignoring trigger");
            return FlowOutcome::AlreadyInFlight;
        }
        let _guard = InFlightGuard { slot };

        tracing::debug!(%flow, "Flow triggered");
        self.advance(flow, FlowState::Validating);

        let request = QuoteRequest::from_form(fields);
        if let Err(errors) = validate_for(flow, &request) {
            tracing::warn!(%flow, fields = ?errors.field_names(), "Form rejected");
            self.emit(PipelineEvent::ValidationRejected {
                flow,
                message: errors.user_message(),
                fields: errors.field_names().iter().map(|f| f.to_string()).collect(),
            });
            self.advance(flow, FlowState::Idle);
            return FlowOutcome::Invalid(errors);
        }

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("pricing_request", %flow, %request_id);
        self.submit(flow, &request, request_id).instrument(span).await
    }

    async fn submit(&self, flow: FlowKind, request: &QuoteRequest, request_id: Uuid) -> FlowOutcome {
        tracing::info!(
            fill_duration_ms = request.fill_duration_millis(),
            "Form submitted"
        );

        self.advance(flow, FlowState::Submitting);
        let previous = self.visible.write().take();
        if let Some(previous) = previous {
            self.emit(PipelineEvent::ResultDismissed {
                flow: previous,
                reason: DismissReason::Superseded,
            });
        }
        self.emit(PipelineEvent::LoadingShown {
            flow,
            message: flow.loading_message().to_string(),
        });

        let response = calculate(self.pricing.as_ref(), flow, request, request_id).await;
        self.emit(PipelineEvent::LoadingHidden { flow });

        match response {
            Ok(body) => {
                self.advance(flow, FlowState::Success);
                let event = match flow {
                    FlowKind::QuickEstimate => {
                        let estimate = normalize_estimate(&body);
                        *self.current_estimate.write() = Some(estimate.clone());
                        PipelineEvent::EstimateReady { estimate }
                    }
                    FlowKind::DetailedQuote => {
                        let quote = normalize_quote(&body);
                        *self.current_quote.write() = Some(quote.clone());
                        PipelineEvent::QuoteReady { quote }
                    }
                };
                let replaced = self.visible.write().replace(flow);
                if let Some(previous) = replaced {
                    self.emit(PipelineEvent::ResultDismissed {
                        flow: previous,
                        reason: DismissReason::Superseded,
                    });
                }
                self.emit(event);
                tracing::info!("Result ready");

                self.advance(flow, FlowState::Idle);
                FlowOutcome::Completed
            }
            Err(err) => {
                tracing::error!(error = %err, status = ?err.http_status(), "Pricing request failed");
                self.advance(flow, FlowState::Failed);
                self.emit(PipelineEvent::RequestFailed {
                    flow,
                    message: flow.failure_message().to_string(),
                });

                self.advance(flow, FlowState::Idle);
                FlowOutcome::Failed(err)
            }
        }
    }

    fn slot(&self, flow: FlowKind) -> &FlowSlot {
        match flow {
            FlowKind::QuickEstimate => &self.estimate_slot,
            FlowKind::DetailedQuote => &self.quote_slot,
        }
    }

    fn advance(&self, flow: FlowKind, target: FlowState) {
        let mut state = self.slot(flow).state.lock();
        match state.transition_to(target) {
            Ok(next) => *state = next,
            Err(err) => tracing::error!(%flow, error = %err, "Invalid flow transition"),
        }
    }

    fn emit(&self, event: PipelineEvent) {
        // No subscribers is fine: headless callers only look at outcomes.
        let _ = self.events.send(event);
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{sample_estimate_payload, MockPricingService};
    use crate::domain::quote::names;
    use serde_json::json;
    use std::time::Duration;

    fn minimal_fields() -> FormFields {
        FormFields::new()
            .with(names::CLIENT_NAME, "Ana Pérez")
            .with(names::CLIENT_EMAIL, "ana@example.com")
            .with(names::CLIENT_PHONE, "+54 9 261 555 0000")
            .with(names::LOCATION, "mendoza")
            .with(names::CONSTRUCTION_TYPE, "steel-frame")
            .with(names::SQUARE_METERS, "120")
    }

    fn detailed_fields() -> FormFields {
        minimal_fields()
            .with(names::USAGE_TYPE, "vivienda")
            .with(names::FINISH_LEVEL, "standard")
            .with(names::FLOORS, "2")
    }

    fn pipeline_with(mock: &MockPricingService) -> QuotePipeline {
        QuotePipeline::new(Arc::new(mock.clone()))
    }

    fn drain(rx: &mut broadcast::Receiver<PipelineEvent>) -> Vec<PipelineEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    // ───────────────────────────────────────────────────────────────
    // Validation gate
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn rejected_form_makes_no_network_call() {
        let mock = MockPricingService::new();
        let pipeline = pipeline_with(&mock);
        let mut rx = pipeline.subscribe();

        let mut fields = minimal_fields();
        fields.remove(names::CLIENT_PHONE);
        let outcome = pipeline.request_quick_estimate(&fields).await;

        assert!(matches!(outcome, FlowOutcome::Invalid(ref e) if e.has_field(names::CLIENT_PHONE)));
        assert_eq!(mock.call_count(), 0);
        assert_eq!(pipeline.flow_state(FlowKind::QuickEstimate), FlowState::Idle);

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            PipelineEvent::ValidationRejected { flow: FlowKind::QuickEstimate, fields, .. }
                if fields == &vec![names::CLIENT_PHONE.to_string()]
        ));
    }

    #[tokio::test]
    async fn quick_flow_skips_format_checks_detailed_flow_does_not() {
        let mock = MockPricingService::new();
        let pipeline = pipeline_with(&mock);

        let fields = detailed_fields().with(names::CLIENT_EMAIL, "not-an-email");

        assert_eq!(pipeline.request_quick_estimate(&fields).await, FlowOutcome::Completed);
        assert!(matches!(
            pipeline.submit_detailed_quote(&fields).await,
            FlowOutcome::Invalid(_)
        ));
        assert_eq!(mock.call_count(), 1);
    }

    // ───────────────────────────────────────────────────────────────
    // Success and failure
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn successful_estimate_is_stored_and_shown() {
        let mock = MockPricingService::new().with_response(sample_estimate_payload());
        let pipeline = pipeline_with(&mock);
        let mut rx = pipeline.subscribe();

        let outcome = pipeline.request_quick_estimate(&minimal_fields()).await;

        assert!(outcome.is_completed());
        assert_eq!(pipeline.visible_result(), Some(FlowKind::QuickEstimate));
        assert_eq!(pipeline.flow_state(FlowKind::QuickEstimate), FlowState::Idle);
        assert!(!pipeline.is_in_flight(FlowKind::QuickEstimate));
        let estimate = pipeline.current_estimate().unwrap();
        assert_eq!(estimate.estimated_cost, "U$D 187,200");

        let events = drain(&mut rx);
        assert!(matches!(events[0], PipelineEvent::LoadingShown { flow: FlowKind::QuickEstimate, .. }));
        assert!(matches!(events[1], PipelineEvent::LoadingHidden { flow: FlowKind::QuickEstimate }));
        assert!(matches!(events[2], PipelineEvent::EstimateReady { .. }));
    }

    #[tokio::test]
    async fn request_carries_form_values_and_telemetry() {
        let mock = MockPricingService::new();
        let pipeline = pipeline_with(&mock);

        let fields = detailed_fields().with(names::FORM_START_TIME, "1000");
        pipeline.submit_detailed_quote(&fields).await;

        let call = &mock.calls()[0];
        assert_eq!(call.flow, FlowKind::DetailedQuote);
        assert_eq!(call.request.floors, "2");
        assert_eq!(call.request.form_start_time, 1000);
        assert!(call.request.form_submission_time >= 1000);
    }

    #[tokio::test]
    async fn failure_surfaces_generic_message_and_keeps_previous_result() {
        let mock = MockPricingService::new()
            .with_error(PricingError::status(500, "Traceback: ..."));
        let pipeline = pipeline_with(&mock);
        let mut rx = pipeline.subscribe();

        let outcome = pipeline.request_quick_estimate(&minimal_fields()).await;

        assert_eq!(outcome, FlowOutcome::Failed(PricingError::status(500, "Traceback: ...")));
        assert_eq!(pipeline.flow_state(FlowKind::QuickEstimate), FlowState::Idle);
        assert!(pipeline.current_estimate().is_none());
        assert_eq!(pipeline.visible_result(), None);

        let failed = drain(&mut rx)
            .into_iter()
            .find_map(|e| match e {
                PipelineEvent::RequestFailed { message, .. } => Some(message),
                _ => None,
            })
            .unwrap();
        assert_eq!(failed, FlowKind::QuickEstimate.failure_message());
        assert!(!failed.contains("Traceback"));
    }

    #[tokio::test]
    async fn partial_body_is_a_success_with_sentinels() {
        let mock = MockPricingService::new().with_response(json!({"success": true}));
        let pipeline = pipeline_with(&mock);

        let outcome = pipeline.submit_detailed_quote(&detailed_fields()).await;

        assert!(outcome.is_completed());
        assert!(pipeline.current_quote().unwrap().is_blank());
    }

    #[tokio::test]
    async fn no_automatic_retry() {
        let mock = MockPricingService::new().with_error(PricingError::network("refused"));
        let pipeline = pipeline_with(&mock);

        pipeline.submit_detailed_quote(&detailed_fields()).await;

        assert_eq!(mock.call_count(), 1);
    }

    // ───────────────────────────────────────────────────────────────
    // Single flight
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn second_trigger_of_same_flow_is_ignored_while_in_flight() {
        let mock = MockPricingService::new().with_delay(Duration::from_millis(50));
        let pipeline = pipeline_with(&mock);
        let fields = minimal_fields();

        let (first, second) = tokio::join!(
            pipeline.request_quick_estimate(&fields),
            pipeline.request_quick_estimate(&fields)
        );

        assert_eq!(first, FlowOutcome::Completed);
        assert_eq!(second, FlowOutcome::AlreadyInFlight);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn different_flows_run_independently() {
        let mock = MockPricingService::new().with_delay(Duration::from_millis(20));
        let pipeline = pipeline_with(&mock);
        let quick = minimal_fields();
        let detailed = detailed_fields();

        let (a, b) = tokio::join!(
            pipeline.request_quick_estimate(&quick),
            pipeline.submit_detailed_quote(&detailed)
        );

        assert!(a.is_completed());
        assert!(b.is_completed());
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn latch_is_released_after_each_attempt() {
        let mock = MockPricingService::new().with_error(PricingError::network("refused"));
        let pipeline = pipeline_with(&mock);

        pipeline.request_quick_estimate(&minimal_fields()).await;
        let outcome = pipeline.request_quick_estimate(&minimal_fields()).await;

        assert!(outcome.is_completed());
        assert_eq!(mock.call_count(), 2);
    }

    // ───────────────────────────────────────────────────────────────
    // Result view
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn dismissal_hides_view_but_keeps_result() {
        let mock = MockPricingService::new();
        let pipeline = pipeline_with(&mock);
        pipeline.submit_detailed_quote(&detailed_fields()).await;

        assert!(pipeline.dismiss_result(DismissReason::EscapeKey));

        assert_eq!(pipeline.visible_result(), None);
        assert!(pipeline.current_quote().is_some());
        assert!(!pipeline.dismiss_result(DismissReason::Backdrop));
    }

    #[tokio::test]
    async fn new_submission_supersedes_visible_result() {
        let mock = MockPricingService::new();
        let pipeline = pipeline_with(&mock);
        pipeline.request_quick_estimate(&minimal_fields()).await;
        let mut rx = pipeline.subscribe();

        pipeline.submit_detailed_quote(&detailed_fields()).await;

        let events = drain(&mut rx);
        assert_eq!(
            events[0],
            PipelineEvent::ResultDismissed {
                flow: FlowKind::QuickEstimate,
                reason: DismissReason::Superseded
            }
        );
        assert_eq!(pipeline.visible_result(), Some(FlowKind::DetailedQuote));
        assert!(pipeline.current_estimate().is_some());
    }

    #[tokio::test]
    async fn later_finishing_flow_supersedes_the_other_view() {
        let mock = MockPricingService::new().with_delay(Duration::from_millis(20));
        let pipeline = pipeline_with(&mock);
        let mut rx = pipeline.subscribe();

        let minimal = minimal_fields();
        let detailed = detailed_fields();
        tokio::join!(
            pipeline.request_quick_estimate(&minimal),
            pipeline.submit_detailed_quote(&detailed)
        );

        let events = drain(&mut rx);
        let ready: Vec<FlowKind> = events
            .iter()
            .filter_map(|e| match e {
                PipelineEvent::EstimateReady { .. } | PipelineEvent::QuoteReady { .. } => e.flow(),
                _ => None,
            })
            .collect();
        assert_eq!(ready.len(), 2);
        let (first, last) = (ready[0], ready[1]);

        assert!(events.contains(&PipelineEvent::ResultDismissed {
            flow: first,
            reason: DismissReason::Superseded,
        }));
        assert_eq!(pipeline.visible_result(), Some(last));
        assert!(pipeline.has_result(first));
    }

    #[tokio::test]
    async fn new_success_overwrites_current_result() {
        let mock = MockPricingService::new()
            .with_response(json!({"quote": {"total_cost": "$1"}}))
            .with_response(json!({"quote": {"total_cost": "$2"}}));
        let pipeline = pipeline_with(&mock);

        pipeline.submit_detailed_quote(&detailed_fields()).await;
        pipeline.submit_detailed_quote(&detailed_fields()).await;

        assert_eq!(pipeline.current_quote().unwrap().total_cost, "$2");
    }
}
