//! Canonical outbound payload for both pricing calculations.

use serde::Serialize;

use super::fields::{names, FormFields};
use crate::domain::foundation::Timestamp;

/// Floors assumed when the form leaves the field blank.
pub const DEFAULT_FLOORS: &str = "1";

/// Request body sent to the pricing service.
///
/// Numeric fields keep the text the user typed; the service parses them and
/// the validators check them before anything is sent. Built fresh for every
/// submission and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub location: String,
    pub construction_type: String,
    pub square_meters: String,
    pub floors: String,
    pub usage_type: String,
    pub finish_level: String,
    pub form_start_time: i64,
    pub form_submission_time: i64,
}

impl QuoteRequest {
    /// Maps raw form fields into a request stamped with the current time.
    pub fn from_form(fields: &FormFields) -> Self {
        Self::from_form_at(fields, Timestamp::now())
    }

    /// Maps raw form fields using `now` as the submission time.
    ///
    /// Never fails: absent strings become empty, blank floors become
    /// [`DEFAULT_FLOORS`], and a missing or unreadable start time is
    /// backfilled with `now` so elapsed-time telemetry reads zero.
    pub fn from_form_at(fields: &FormFields, now: Timestamp) -> Self {
        let text = |key: &str| fields.get(key).unwrap_or_default().to_string();
        let now_millis = now.as_unix_millis();

        let floors = match fields.get(names::FLOORS) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => DEFAULT_FLOORS.to_string(),
        };

        let form_start_time = fields
            .get(names::FORM_START_TIME)
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or(now_millis);

        Self {
            client_name: text(names::CLIENT_NAME),
            client_email: text(names::CLIENT_EMAIL),
            client_phone: text(names::CLIENT_PHONE),
            location: text(names::LOCATION),
            construction_type: text(names::CONSTRUCTION_TYPE),
            square_meters: text(names::SQUARE_METERS),
            floors,
            usage_type: text(names::USAGE_TYPE),
            finish_level: text(names::FINISH_LEVEL),
            form_start_time,
            form_submission_time: now_millis,
        }
    }

    /// Looks up a text field by its wire name.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            names::CLIENT_NAME => &self.client_name,
            names::CLIENT_EMAIL => &self.client_email,
            names::CLIENT_PHONE => &self.client_phone,
            names::LOCATION => &self.location,
            names::CONSTRUCTION_TYPE => &self.construction_type,
            names::SQUARE_METERS => &self.square_meters,
            names::FLOORS => &self.floors,
            names::USAGE_TYPE => &self.usage_type,
            names::FINISH_LEVEL => &self.finish_level,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Area as a number, if the text parses.
    pub fn square_meters_value(&self) -> Option<f64> {
        self.square_meters
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    /// Floor count as a number, if the text parses.
    pub fn floors_value(&self) -> Option<u32> {
        self.floors.trim().parse().ok()
    }

    /// Milliseconds the user spent filling the form, never negative.
    pub fn fill_duration_millis(&self) -> i64 {
        self.form_submission_time
            .saturating_sub(self.form_start_time)
            .max(0)
    }
}
