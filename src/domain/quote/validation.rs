//! Field predicates and the two form gates built on them.
//!
//! The quick estimate only needs the minimal fields to be present. The
//! detailed quote needs everything the quick estimate needs plus usage and
//! finish, well-formed contact data and numbers inside their domains.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::fields::{field_label, names, DETAILED_EXTRA_FIELDS, MINIMAL_FIELDS};
use super::flow::FlowKind;
use super::request::QuoteRequest;
use crate::domain::foundation::ValidationError;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").expect("phone pattern is valid"));

/// Upper bound for the built area, in square meters.
pub const MAX_SQUARE_METERS: f64 = 10_000.0;
/// Lowest floor count accepted.
pub const MIN_FLOORS: u32 = 1;
/// Highest floor count accepted.
pub const MAX_FLOORS: u32 = 10;

/// True iff the trimmed value has at least one character.
pub fn is_non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True iff the value looks like `local@domain.tld` with no whitespace.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// True iff the value is an optional `+` followed by at least ten digits,
/// spaces, hyphens or parentheses.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

/// Inclusive numeric range check.
pub fn is_in_range(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}

/// A form rejected before any network call, with every offending field.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} form rejected on {} field(s): {}", .flow, .errors.len(), field_list(.errors))]
pub struct FormErrors {
    flow: FlowKind,
    errors: Vec<ValidationError>,
}

impl FormErrors {
    pub fn flow(&self) -> FlowKind {
        self.flow
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Wire names of the offending fields, in form order.
    pub fn field_names(&self) -> Vec<&str> {
        self.errors.iter().map(ValidationError::field).collect()
    }

    /// True if `field` failed for any reason.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field() == field)
    }

    /// Single message for the user, naming every offending field.
    pub fn user_message(&self) -> String {
        let labels: Vec<&str> = self.errors.iter().map(|e| field_label(e.field())).collect();
        format!(
            "{} Revisa: {}.",
            self.flow.validation_message(),
            labels.join(", ")
        )
    }
}

/// Gate for the quick estimate: presence of the minimal fields only.
pub fn validate_minimal(request: &QuoteRequest) -> Result<(), FormErrors> {
    finish(FlowKind::QuickEstimate, missing_fields(request, &MINIMAL_FIELDS))
}

/// Gate for the detailed quote: the minimal gate plus usage, finish,
/// contact formats and numeric domains.
pub fn validate_detailed(request: &QuoteRequest) -> Result<(), FormErrors> {
    let mut errors = missing_fields(request, &MINIMAL_FIELDS);
    errors.extend(missing_fields(request, &DETAILED_EXTRA_FIELDS));

    if !has_error(&errors, names::CLIENT_EMAIL) && !is_valid_email(&request.client_email) {
        errors.push(ValidationError::invalid_format(
            names::CLIENT_EMAIL,
            "expected local@domain.tld",
        ));
    }

    if !has_error(&errors, names::CLIENT_PHONE) && !is_valid_phone(&request.client_phone) {
        errors.push(ValidationError::invalid_format(
            names::CLIENT_PHONE,
            "expected at least 10 digits",
        ));
    }

    if !has_error(&errors, names::SQUARE_METERS) {
        match request.square_meters_value() {
            Some(area) if area > 0.0 && is_in_range(area, 0.0, MAX_SQUARE_METERS) => {}
            Some(area) => errors.push(ValidationError::out_of_range(
                names::SQUARE_METERS,
                0.0,
                MAX_SQUARE_METERS,
                area,
            )),
            None => errors.push(ValidationError::invalid_format(
                names::SQUARE_METERS,
                "expected a number",
            )),
        }
    }

    match request.floors_value() {
        Some(floors) if is_in_range(floors as f64, MIN_FLOORS as f64, MAX_FLOORS as f64) => {}
        Some(floors) => errors.push(ValidationError::out_of_range(
            names::FLOORS,
            MIN_FLOORS as f64,
            MAX_FLOORS as f64,
            floors as f64,
        )),
        None => errors.push(ValidationError::invalid_format(
            names::FLOORS,
            "expected a whole number",
        )),
    }

    finish(FlowKind::DetailedQuote, errors)
}

/// Runs the gate that belongs to `flow`.
pub fn validate_for(flow: FlowKind, request: &QuoteRequest) -> Result<(), FormErrors> {
    match flow {
        FlowKind::QuickEstimate => validate_minimal(request),
        FlowKind::DetailedQuote => validate_detailed(request),
    }
}

fn missing_fields(request: &QuoteRequest, required: &[&str]) -> Vec<ValidationError> {
    required
        .iter()
        .filter(|name| !request.field(name).is_some_and(is_non_empty))
        .map(|name| ValidationError::empty_field(*name))
        .collect()
}

fn has_error(errors: &[ValidationError], field: &str) -> bool {
    errors.iter().any(|e| e.field() == field)
}

fn field_list(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::field)
        .collect::<Vec<_>>()
        .join(", ")
}

fn finish(flow: FlowKind, errors: Vec<ValidationError>) -> Result<(), FormErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(FormErrors { flow, errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::quote::FormFields;
    use proptest::prelude::*;

    fn complete_fields() -> FormFields {
        FormFields::new()
            .with("clientName", "Franco")
            .with("clientEmail", "franco@example.com")
            .with("clientPhone", "+5492613151000")
            .with("location", "mendoza")
            .with("constructionType", "steel-frame")
            .with("squareMeters", "120")
            .with("floors", "2")
            .with("usageType", "residencial")
            .with("finishLevel", "estandar")
    }

    fn request(fields: &FormFields) -> QuoteRequest {
        QuoteRequest::from_form_at(fields, Timestamp::from_unix_millis(0).unwrap())
    }

    // ───────────────────────────────────────────────────────────────
    // Predicates
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn non_empty_trims_whitespace() {
        assert!(is_non_empty("a"));
        assert!(!is_non_empty(""));
        assert!(!is_non_empty("   \t"));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.ar"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana maria@example.com"));
        assert!(!is_valid_email("ana@@example.com"));
    }

    #[test]
    fn phone_shape() {
        assert!(is_valid_phone("+5492613151000"));
        assert!(is_valid_phone("(0261) 555-1234"));
        assert!(is_valid_phone("261 555 1234"));
        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("+54 261 abc 1234"));
        assert!(!is_valid_phone("++5492613151000"));
    }

    #[test]
    fn range_is_inclusive() {
        assert!(is_in_range(1.0, 1.0, 10.0));
        assert!(is_in_range(10.0, 1.0, 10.0));
        assert!(!is_in_range(10.5, 1.0, 10.0));
        assert!(!is_in_range(0.0, 1.0, 10.0));
    }

    // ───────────────────────────────────────────────────────────────
    // Gates
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn complete_form_passes_both_gates() {
        let req = request(&complete_fields());
        assert!(validate_minimal(&req).is_ok());
        assert!(validate_detailed(&req).is_ok());
    }

    #[test]
    fn minimal_gate_ignores_usage_and_finish() {
        let mut fields = complete_fields();
        fields.remove("usageType");
        fields.remove("finishLevel");
        let req = request(&fields);

        assert!(validate_minimal(&req).is_ok());
        let err = validate_detailed(&req).unwrap_err();
        assert_eq!(err.field_names(), vec!["usageType", "finishLevel"]);
    }

    #[test]
    fn bad_contact_formats_fail_only_the_detailed_gate() {
        let fields = complete_fields()
            .with("clientEmail", "not-an-email")
            .with("clientPhone", "123");
        let req = request(&fields);

        assert!(validate_minimal(&req).is_ok());
        let err = validate_detailed(&req).unwrap_err();
        assert!(err.has_field("clientEmail"));
        assert!(err.has_field("clientPhone"));
        assert_eq!(err.flow(), FlowKind::DetailedQuote);
    }

    #[test]
    fn missing_email_is_reported_once() {
        let mut fields = complete_fields();
        fields.remove("clientEmail");
        let err = validate_detailed(&request(&fields)).unwrap_err();
        assert_eq!(err.field_names(), vec!["clientEmail"]);
        assert!(matches!(err.errors()[0], ValidationError::EmptyField { .. }));
    }

    #[test]
    fn area_domain_is_exclusive_at_zero_and_inclusive_at_ten_thousand() {
        for (area, ok) in [("0", false), ("0.5", true), ("10000", true), ("10000.1", false), ("-4", false)] {
            let req = request(&complete_fields().with("squareMeters", area));
            assert_eq!(validate_detailed(&req).is_ok(), ok, "area {}", area);
        }
    }

    #[test]
    fn area_must_be_numeric_for_detailed_quote() {
        let req = request(&complete_fields().with("squareMeters", "mucho"));
        assert!(validate_minimal(&req).is_ok());
        let err = validate_detailed(&req).unwrap_err();
        assert!(matches!(err.errors()[0], ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn floors_domain() {
        for (floors, ok) in [("1", true), ("10", true), ("0", false), ("11", false), ("dos", false)] {
            let req = request(&complete_fields().with("floors", floors));
            assert_eq!(validate_detailed(&req).is_ok(), ok, "floors {}", floors);
        }
    }

    #[test]
    fn blank_floors_fall_back_to_one_and_pass() {
        let req = request(&complete_fields().with("floors", ""));
        assert!(validate_detailed(&req).is_ok());
    }

    #[test]
    fn user_message_lists_labels() {
        let err = validate_minimal(&request(&FormFields::new().with("clientName", "Ana"))).unwrap_err();
        let message = err.user_message();

        assert!(message.starts_with(FlowKind::QuickEstimate.validation_message()));
        assert!(message.contains("Email"));
        assert!(message.contains("Metros cuadrados"));
        assert!(!message.contains("Nombre"));
    }

    #[test]
    fn display_names_fields_but_not_values() {
        let fields = complete_fields().with("clientEmail", "secret-value");
        let err = validate_detailed(&request(&fields)).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("clientEmail"));
        assert!(!text.contains("secret-value"));
    }

    #[test]
    fn validate_for_dispatches_by_flow() {
        let req = request(&complete_fields().with("clientPhone", "123"));
        assert!(validate_for(FlowKind::QuickEstimate, &req).is_ok());
        assert!(validate_for(FlowKind::DetailedQuote, &req).is_err());
    }

    proptest! {
        #[test]
        fn dropping_any_minimal_field_fails_both_gates(index in 0usize..6, blank in prop::bool::ANY) {
            let mut fields = complete_fields();
            let name = MINIMAL_FIELDS[index];
            if blank {
                fields.insert(name, "   ");
            } else {
                fields.remove(name);
            }
            let req = request(&fields);

            prop_assert!(validate_minimal(&req).is_err());
            prop_assert!(validate_detailed(&req).is_err());
            prop_assert!(validate_minimal(&req).unwrap_err().has_field(name));
        }

        #[test]
        fn detailed_gate_implies_minimal_gate(
            name in "[ A-Za-z]{0,8}",
            email in "[a-z@. ]{0,12}",
            phone in "[0-9+ ]{0,14}",
            area in "[0-9.]{0,6}",
        ) {
            let fields = complete_fields()
                .with("clientName", name)
                .with("clientEmail", email)
                .with("clientPhone", phone)
                .with("squareMeters", area);
            let req = request(&fields);
            if validate_detailed(&req).is_ok() {
                prop_assert!(validate_minimal(&req).is_ok());
            }
        }
    }
}
