//! Document Renderer Port - turns a canonical result into a downloadable
//! document.
//!
//! Whether the bytes come from a local print-ready page or a server-side
//! PDF endpoint is an adapter detail.

use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::quote::{Estimate, FlowKind, Quote};

/// Port for rendering an estimate or quote into a document.
///
/// # Contract
///
/// Implementations must:
/// - Render every canonical field, sentinel values included
/// - Keep the breakdown in the order received
/// - Report failures as [`ExportError`] without panicking
///
/// # Usage
///
/// ```rust,ignore
/// let renderer: &dyn DocumentRenderer = get_renderer();
/// let document = renderer.render(&ExportSubject::Quote(quote)).await?;
/// document.write_to_dir("/tmp").await?;
/// ```
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// Render the subject into a document.
    async fn render(&self, subject: &ExportSubject) -> Result<ExportedDocument, ExportError>;

    /// Format this renderer produces.
    fn format(&self) -> ExportFormat;
}

/// What is being exported.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ExportSubject {
    Estimate(Estimate),
    Quote(Quote),
}

impl ExportSubject {
    /// Flow that produced the subject.
    pub fn flow(&self) -> FlowKind {
        match self {
            ExportSubject::Estimate(_) => FlowKind::QuickEstimate,
            ExportSubject::Quote(_) => FlowKind::DetailedQuote,
        }
    }

    /// File name without extension.
    pub fn base_filename(&self) -> &'static str {
        match self {
            ExportSubject::Estimate(_) => "estimacion-rapida",
            ExportSubject::Quote(_) => "cotizacion-construccion",
        }
    }
}

/// Export formats supported by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Print-ready HTML page.
    Html,
    /// PDF document.
    Pdf,
}

impl ExportFormat {
    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Html => "text/html; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Html => write!(f, "html"),
            ExportFormat::Pdf => write!(f, "pdf"),
        }
    }
}

/// Exported document with content and metadata.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// The exported content as bytes.
    pub content: Vec<u8>,
    /// The MIME content type.
    pub content_type: String,
    /// Suggested filename for download.
    pub filename: String,
    /// The format that was used.
    pub format: ExportFormat,
}

impl ExportedDocument {
    /// Create a new exported document.
    pub fn new(content: Vec<u8>, format: ExportFormat, base_filename: &str) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", base_filename, format.extension()),
            format,
        }
    }

    /// Create from HTML content.
    pub fn from_html(html: String, base_filename: &str) -> Self {
        Self::new(html.into_bytes(), ExportFormat::Html, base_filename)
    }

    /// Create from PDF bytes.
    pub fn from_pdf(pdf_bytes: Vec<u8>, base_filename: &str) -> Self {
        Self::new(pdf_bytes, ExportFormat::Pdf, base_filename)
    }

    /// Writes the document into `dir` under its suggested filename.
    pub async fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| ExportError::io_error(format!("{}: {}", dir.display(), e)))?;

        let path = dir.join(&self.filename);
        tokio::fs::write(&path, &self.content)
            .await
            .map_err(|e| ExportError::io_error(format!("{}: {}", path.display(), e)))?;

        Ok(path)
    }
}

/// Errors that can occur during document export.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    /// Export asked for before the flow produced a result.
    #[error("nothing to export: no {0} result yet")]
    NothingToExport(FlowKind),

    /// Remote renderer could not be reached or refused the request.
    #[error("Export service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rendering itself failed.
    #[error("Rendering failed: {0}")]
    RenderFailed(String),

    /// I/O error while persisting the document.
    #[error("I/O error during export: {0}")]
    IoError(String),
}

impl ExportError {
    /// Create a service unavailable error.
    pub fn service_unavailable(reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable(reason.into())
    }

    /// Create a rendering error.
    pub fn render_failed(reason: impl Into<String>) -> Self {
        Self::RenderFailed(reason.into())
    }

    /// Create an I/O error.
    pub fn io_error(reason: impl Into<String>) -> Self {
        Self::IoError(reason.into())
    }

    /// Short text for the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::NothingToExport(flow) => flow.nothing_to_export_message().to_string(),
            _ => "Error generando el documento. Intenta nuevamente.".to_string(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
