//! In-memory test doubles for every port.

mod mock_pricing_service;
mod recording;

pub use mock_pricing_service::{
    sample_estimate_payload, sample_quote_payload, MockPricingCall, MockPricingService,
};
pub use recording::{RecordingEmailSender, RecordingRenderer, RecordingShareChannel};
