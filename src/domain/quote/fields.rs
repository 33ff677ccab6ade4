//! Raw form input and the fixed field-name vocabulary shared by the
//! request mapper, the validators and the user-facing messages.

use std::collections::BTreeMap;

use crate::domain::foundation::Timestamp;

/// Wire names of the quote form fields.
pub mod names {
    pub const CLIENT_NAME: &str = "clientName";
    pub const CLIENT_EMAIL: &str = "clientEmail";
    pub const CLIENT_PHONE: &str = "clientPhone";
    pub const LOCATION: &str = "location";
    pub const CONSTRUCTION_TYPE: &str = "constructionType";
    pub const SQUARE_METERS: &str = "squareMeters";
    pub const FLOORS: &str = "floors";
    pub const USAGE_TYPE: &str = "usageType";
    pub const FINISH_LEVEL: &str = "finishLevel";
    pub const FORM_START_TIME: &str = "formStartTime";
    pub const FORM_SUBMISSION_TIME: &str = "formSubmissionTime";
}

/// Fields every calculation needs, quick estimate included.
pub const MINIMAL_FIELDS: [&str; 6] = [
    names::CLIENT_NAME,
    names::CLIENT_EMAIL,
    names::CLIENT_PHONE,
    names::LOCATION,
    names::CONSTRUCTION_TYPE,
    names::SQUARE_METERS,
];

/// Extra fields the detailed quote requires on top of [`MINIMAL_FIELDS`].
pub const DETAILED_EXTRA_FIELDS: [&str; 2] = [names::USAGE_TYPE, names::FINISH_LEVEL];

/// Spanish label shown to the user for a form field.
pub fn field_label(name: &str) -> &'static str {
    match name {
        names::CLIENT_NAME => "Nombre",
        names::CLIENT_EMAIL => "Email",
        names::CLIENT_PHONE => "Teléfono",
        names::LOCATION => "Ubicación",
        names::CONSTRUCTION_TYPE => "Tipo de construcción",
        names::SQUARE_METERS => "Metros cuadrados",
        names::FLOORS => "Pisos",
        names::USAGE_TYPE => "Tipo de uso",
        names::FINISH_LEVEL => "Nivel de terminación",
        _ => "Campo",
    }
}

/// Raw string key/value pairs as collected from the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`FormFields::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Records when the form was first shown, unless already recorded.
    pub fn stamp_start(&mut self, at: Timestamp) {
        self.0
            .entry(names::FORM_START_TIME.to_string())
            .or_insert_with(|| at.as_unix_millis().to_string());
    }
}

impl<K, V> FromIterator<(K, V)> for FormFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
