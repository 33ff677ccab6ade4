//! Display-ready results produced by the normalizer.
//!
//! Every field is a string that can be shown as-is. Absent data is the
//! [`SENTINEL`], never an error, so presentation always succeeds.

use serde::Serialize;

/// Placeholder for any field the pricing service did not provide.
pub const SENTINEL: &str = "N/A";

/// Placeholder for a breakdown line without a category.
pub const DEFAULT_CATEGORY: &str = "Categoría";

/// Normalized quick-estimate result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub area: String,
    pub construction_type: String,
    pub estimated_cost: String,
    pub estimated_time: String,
    pub location: String,
    pub usage_type: String,
    pub finish_level: String,
}

impl Estimate {
    /// True when every field is the sentinel.
    pub fn is_blank(&self) -> bool {
        [
            &self.area,
            &self.construction_type,
            &self.estimated_cost,
            &self.estimated_time,
            &self.location,
            &self.usage_type,
            &self.finish_level,
        ]
        .iter()
        .all(|value| value.as_str() == SENTINEL)
    }
}

impl Default for Estimate {
    fn default() -> Self {
        Self {
            area: SENTINEL.to_string(),
            construction_type: SENTINEL.to_string(),
            estimated_cost: SENTINEL.to_string(),
            estimated_time: SENTINEL.to_string(),
            location: SENTINEL.to_string(),
            usage_type: SENTINEL.to_string(),
            finish_level: SENTINEL.to_string(),
        }
    }
}

/// One line of the itemized cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownItem {
    pub category: String,
    pub cost: String,
}

impl BreakdownItem {
    pub fn new(category: impl Into<String>, cost: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            cost: cost.into(),
        }
    }
}

impl Default for BreakdownItem {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORY, SENTINEL)
    }
}

/// Normalized detailed-quote result.
///
/// `client_email` and `client_phone` are carried for the export and share
/// adapters only; the result view does not show them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub construction_type: String,
    pub area: String,
    pub floors: String,
    pub total_cost: String,
    pub estimated_time: String,
    pub finish_level: String,
    pub location: String,
    pub usage_type: String,
    pub quote_date: String,
    pub valid_until: String,
    pub breakdown: Vec<BreakdownItem>,
}

impl Quote {
    /// True when every scalar field is the sentinel and there is no breakdown.
    pub fn is_blank(&self) -> bool {
        self.breakdown.is_empty()
            && [
                &self.client_name,
                &self.client_email,
                &self.client_phone,
                &self.construction_type,
                &self.area,
                &self.floors,
                &self.total_cost,
                &self.estimated_time,
                &self.finish_level,
                &self.location,
                &self.usage_type,
                &self.quote_date,
                &self.valid_until,
            ]
            .iter()
            .all(|value| value.as_str() == SENTINEL)
    }

    /// Client email, unless the service left it out.
    pub fn recipient_email(&self) -> Option<&str> {
        Some(self.client_email.as_str()).filter(|email| *email != SENTINEL)
    }
}

impl Default for Quote {
    fn default() -> Self {
        Self {
            client_name: SENTINEL.to_string(),
            client_email: SENTINEL.to_string(),
            client_phone: SENTINEL.to_string(),
            construction_type: SENTINEL.to_string(),
            area: SENTINEL.to_string(),
            floors: SENTINEL.to_string(),
            total_cost: SENTINEL.to_string(),
            estimated_time: SENTINEL.to_string(),
            finish_level: SENTINEL.to_string(),
            location: SENTINEL.to_string(),
            usage_type: SENTINEL.to_string(),
            quote_date: SENTINEL.to_string(),
            valid_until: SENTINEL.to_string(),
            breakdown: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_blank() {
        assert!(Estimate::default().is_blank());
        assert!(Quote::default().is_blank());
    }

    #[test]
    fn a_breakdown_line_makes_a_quote_non_blank() {
        let quote = Quote {
            breakdown: vec![BreakdownItem::default()],
            ..Quote::default()
        };
        assert!(!quote.is_blank());
    }

    #[test]
    fn recipient_email_skips_sentinel() {
        assert_eq!(Quote::default().recipient_email(), None);
        let quote = Quote {
            client_email: "ana@example.com".to_string(),
            ..Quote::default()
        };
        assert_eq!(quote.recipient_email(), Some("ana@example.com"));
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(Quote::default()).unwrap();
        assert_eq!(json["totalCost"], SENTINEL);
        assert!(json["breakdown"].as_array().unwrap().is_empty());
    }
}
