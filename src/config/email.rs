//! Email configuration (backend relay)

use serde::Deserialize;

use super::error::{check_path, ConfigValidationError};

/// Email configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Send quote emails through the backend relay
    #[serde(default)]
    pub enabled: bool,

    /// Relay endpoint on the pricing backend
    #[serde(default = "default_send_path")]
    pub send_path: String,
}

impl EmailConfig {
    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.enabled {
            check_path(&self.send_path, "email send")?;
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            send_path: default_send_path(),
        }
    }
}

fn default_send_path() -> String {
    "/api/email/send".to_string()
}
