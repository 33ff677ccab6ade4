//! UTC instants as the form and the documents see them.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

/// A point in time, always UTC.
///
/// The form carries instants as Unix milliseconds; printed documents show
/// them as `dd/mm/yyyy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// `None` when chrono cannot represent the value.
    pub fn from_unix_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    pub fn as_unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Day-first date as printed on Argentine documents.
    pub fn to_local_date_string(&self) -> String {
        self.0.format("%d/%m/%Y").to_string()
    }
}
