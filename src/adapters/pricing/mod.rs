//! Pricing adapters - implementations of the `PricingService` port.

mod http_pricing_service;

pub use http_pricing_service::{
    HttpPricingConfig, HttpPricingService, DEFAULT_ESTIMATE_PATH, DEFAULT_QUOTE_PATH,
};
