//! Quote module - form input, outbound request, validation, result
//! normalization and the per-flow lifecycle.
//!
//! # Pipeline
//!
//! ```text
//! FormFields -> QuoteRequest -> validate_for(flow) -> pricing service
//!            -> normalize_estimate / normalize_quote -> Estimate / Quote
//! ```

mod fields;
mod flow;
mod normalize;
mod request;
mod result;
mod validation;

pub use fields::{field_label, names, FormFields, DETAILED_EXTRA_FIELDS, MINIMAL_FIELDS};
pub use flow::{FlowKind, FlowState};
pub use normalize::{
    normalize_estimate, normalize_quote, FieldAliases, ESTIMATE_FIELDS, ESTIMATE_WRAPPER,
    QUOTE_FIELDS, QUOTE_WRAPPER,
};
pub use request::{QuoteRequest, DEFAULT_FLOORS};
pub use result::{BreakdownItem, Estimate, Quote, DEFAULT_CATEGORY, SENTINEL};
pub use validation::{
    is_in_range, is_non_empty, is_valid_email, is_valid_phone, validate_detailed, validate_for,
    validate_minimal, FormErrors, MAX_FLOORS, MAX_SQUARE_METERS, MIN_FLOORS,
};
