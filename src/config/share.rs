//! Share configuration (WhatsApp hand-off)

use serde::Deserialize;

use super::error::{check_http_url, ConfigValidationError};

/// Share configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ShareConfig {
    /// Click-to-chat host
    #[serde(default = "default_messaging_base_url")]
    pub messaging_base_url: String,

    /// Sales number; a leading `+` and separators are allowed
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,

    /// Program that opens URIs on this machine
    #[serde(default = "default_opener_command")]
    pub opener_command: String,
}

impl ShareConfig {
    /// Validate share configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        check_http_url(&self.messaging_base_url, "messaging")?;
        let digits = self
            .whatsapp_number
            .chars()
            .filter(char::is_ascii_digit)
            .count();
        if digits < 8 {
            return Err(ConfigValidationError::InvalidWhatsAppNumber);
        }
        if self.opener_command.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired("SHARE__OPENER_COMMAND"));
        }
        Ok(())
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            messaging_base_url: default_messaging_base_url(),
            whatsapp_number: default_whatsapp_number(),
            opener_command: default_opener_command(),
        }
    }
}

fn default_messaging_base_url() -> String {
    "https://wa.me".to_string()
}

fn default_whatsapp_number() -> String {
    "+5492617110120".to_string()
}

fn default_opener_command() -> String {
    "xdg-open".to_string()
}
