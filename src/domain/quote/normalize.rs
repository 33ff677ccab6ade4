//! Reconciles the pricing service's response envelopes into [`Estimate`]
//! and [`Quote`].
//!
//! The service has shipped several shapes over time: the payload may sit
//! under a wrapper key (`estimation`, `quote`) or at the top level, and
//! field names have been both snake_case and camelCase. Each canonical
//! field lists the spellings it accepts; the first present value wins.
//!
//! Normalization never fails. Anything missing becomes the sentinel.

use serde_json::Value;

use super::result::{BreakdownItem, Estimate, Quote, DEFAULT_CATEGORY, SENTINEL};

/// Wrapper key the estimate endpoint nests its payload under.
pub const ESTIMATE_WRAPPER: &str = "estimation";
/// Wrapper key the quote endpoint nests its payload under.
pub const QUOTE_WRAPPER: &str = "quote";

/// Accepted source spellings for one canonical field, in priority order.
#[derive(Debug, Clone, Copy)]
pub struct FieldAliases {
    pub canonical: &'static str,
    pub keys: &'static [&'static str],
}

const fn aliases(canonical: &'static str, keys: &'static [&'static str]) -> FieldAliases {
    FieldAliases { canonical, keys }
}

const AREA: FieldAliases = aliases("area", &["area"]);
const CONSTRUCTION_TYPE: FieldAliases =
    aliases("constructionType", &["construction_type", "constructionType"]);
const ESTIMATED_COST: FieldAliases =
    aliases("estimatedCost", &["estimated_cost", "estimatedCost"]);
const ESTIMATED_TIME: FieldAliases =
    aliases("estimatedTime", &["estimated_time", "estimatedTime"]);
const LOCATION: FieldAliases = aliases("location", &["location"]);
const USAGE_TYPE: FieldAliases = aliases("usageType", &["usage_type", "usageType"]);
const FINISH_LEVEL: FieldAliases = aliases("finishLevel", &["finish_level", "finishLevel"]);
const CLIENT_NAME: FieldAliases = aliases("clientName", &["client_name", "clientName"]);
const CLIENT_EMAIL: FieldAliases = aliases("clientEmail", &["client_email", "clientEmail"]);
const CLIENT_PHONE: FieldAliases = aliases("clientPhone", &["client_phone", "clientPhone"]);
const FLOORS: FieldAliases = aliases("floors", &["floors"]);
const TOTAL_COST: FieldAliases = aliases("totalCost", &["total_cost", "totalCost"]);
const QUOTE_DATE: FieldAliases = aliases("quoteDate", &["quote_date", "quoteDate"]);
const VALID_UNTIL: FieldAliases = aliases("validUntil", &["valid_until", "validUntil"]);
const BREAKDOWN: FieldAliases = aliases("breakdown", &["breakdown"]);
const CATEGORY: FieldAliases = aliases("category", &["category"]);
const COST: FieldAliases = aliases("cost", &["cost"]);

/// Scalar fields of an [`Estimate`].
pub const ESTIMATE_FIELDS: [FieldAliases; 7] = [
    AREA,
    CONSTRUCTION_TYPE,
    ESTIMATED_COST,
    ESTIMATED_TIME,
    LOCATION,
    USAGE_TYPE,
    FINISH_LEVEL,
];

/// Scalar fields of a [`Quote`].
pub const QUOTE_FIELDS: [FieldAliases; 13] = [
    CLIENT_NAME,
    CLIENT_EMAIL,
    CLIENT_PHONE,
    CONSTRUCTION_TYPE,
    AREA,
    FLOORS,
    TOTAL_COST,
    ESTIMATED_TIME,
    FINISH_LEVEL,
    LOCATION,
    USAGE_TYPE,
    QUOTE_DATE,
    VALID_UNTIL,
];

/// Builds an [`Estimate`] from whatever the estimate endpoint returned.
pub fn normalize_estimate(raw: &Value) -> Estimate {
    let payload = unwrap_payload(raw, ESTIMATE_WRAPPER);

    let estimate = Estimate {
        area: display_field(payload, &AREA),
        construction_type: display_field(payload, &CONSTRUCTION_TYPE),
        estimated_cost: display_field(payload, &ESTIMATED_COST),
        estimated_time: display_field(payload, &ESTIMATED_TIME),
        location: display_field(payload, &LOCATION),
        usage_type: display_field(payload, &USAGE_TYPE),
        finish_level: display_field(payload, &FINISH_LEVEL),
    };

    if estimate.is_blank() {
        tracing::warn!("Estimate response carried no recognizable fields");
    }

    estimate
}

/// Builds a [`Quote`] from whatever the quote endpoint returned.
pub fn normalize_quote(raw: &Value) -> Quote {
    let payload = unwrap_payload(raw, QUOTE_WRAPPER);

    let quote = Quote {
        client_name: display_field(payload, &CLIENT_NAME),
        client_email: display_field(payload, &CLIENT_EMAIL),
        client_phone: display_field(payload, &CLIENT_PHONE),
        construction_type: display_field(payload, &CONSTRUCTION_TYPE),
        area: display_field(payload, &AREA),
        floors: display_field(payload, &FLOORS),
        total_cost: display_field(payload, &TOTAL_COST),
        estimated_time: display_field(payload, &ESTIMATED_TIME),
        finish_level: display_field(payload, &FINISH_LEVEL),
        location: display_field(payload, &LOCATION),
        usage_type: display_field(payload, &USAGE_TYPE),
        quote_date: display_field(payload, &QUOTE_DATE),
        valid_until: display_field(payload, &VALID_UNTIL),
        breakdown: breakdown(payload),
    };

    if quote.is_blank() {
        tracing::warn!("Quote response carried no recognizable fields");
    }

    quote
}

/// Returns the object under `wrapper` when there is one, else `raw` itself.
fn unwrap_payload<'a>(raw: &'a Value, wrapper: &str) -> &'a Value {
    match raw.get(wrapper) {
        Some(inner) if inner.is_object() => inner,
        _ => raw,
    }
}

/// First present value among the aliases, rendered for display.
fn lookup(payload: &Value, field: &FieldAliases) -> Option<String> {
    field
        .keys
        .iter()
        .find_map(|key| payload.get(*key).and_then(display_value))
}

fn display_field(payload: &Value, field: &FieldAliases) -> String {
    lookup(payload, field).unwrap_or_else(|| SENTINEL.to_string())
}

/// Text for a scalar; `None` for null, blank strings and containers.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn breakdown(payload: &Value) -> Vec<BreakdownItem> {
    let items = BREAKDOWN
        .keys
        .iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_array));

    items
        .map(|items| {
            items
                .iter()
                .map(|item| BreakdownItem {
                    category: lookup(item, &CATEGORY).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                    cost: display_field(item, &COST),
                })
                .collect()
        })
        .unwrap_or_default()
}
