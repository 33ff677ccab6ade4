//! Export configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::{check_path, ConfigValidationError};

/// Which `DocumentRenderer` to use
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Local print-ready HTML page
    #[default]
    Print,
    /// Server-side PDF endpoint
    Remote,
}

/// Export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub renderer: RendererKind,

    /// PDF endpoint on the pricing backend
    #[serde(default = "default_pdf_path")]
    pub pdf_path: String,

    /// Name printed in the document header
    #[serde(default = "default_company_name")]
    pub company_name: String,

    /// Line under the company name in the footer
    #[serde(default = "default_tagline")]
    pub tagline: String,

    /// Contact details in the footer
    #[serde(default = "default_contact_line")]
    pub contact_line: Option<String>,

    /// Where exported documents are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl ExportConfig {
    /// Validate export configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.renderer == RendererKind::Remote {
            check_path(&self.pdf_path, "pdf")?;
        }
        if self.company_name.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired("EXPORT__COMPANY_NAME"));
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            renderer: RendererKind::default(),
            pdf_path: default_pdf_path(),
            company_name: default_company_name(),
            tagline: default_tagline(),
            contact_line: default_contact_line(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_pdf_path() -> String {
    "/cotizar/descargar-pdf".to_string()
}

fn default_company_name() -> String {
    "SUMPETROL".to_string()
}

fn default_tagline() -> String {
    "Construcción y Servicios Industriales".to_string()
}

fn default_contact_line() -> Option<String> {
    Some("Email: ventas@sumpetrol.com.ar | Teléfono: +54 9 261 7110120".to_string())
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_config_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.renderer, RendererKind::Print);
        assert_eq!(config.pdf_path, "/cotizar/descargar-pdf");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pdf_path_only_checked_for_remote_renderer() {
        let mut config = ExportConfig {
            pdf_path: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.renderer = RendererKind::Remote;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidPath("pdf")));
    }

    #[test]
    fn test_requires_company_name() {
        let config = ExportConfig {
            company_name: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
