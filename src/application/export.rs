//! QuoteExporter - hands the current result to the document renderer.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::events::NoticeLevel;
use super::pipeline::QuotePipeline;
use crate::domain::quote::FlowKind;
use crate::ports::{DocumentRenderer, ExportError, ExportSubject, ExportedDocument};

/// Exports the pipeline's current estimate or quote.
///
/// # Dependencies
///
/// - `QuotePipeline`: owner of the current results
/// - `DocumentRenderer`: print page or remote PDF
pub struct QuoteExporter {
    pipeline: Arc<QuotePipeline>,
    renderer: Arc<dyn DocumentRenderer>,
}

impl QuoteExporter {
    pub fn new(pipeline: Arc<QuotePipeline>, renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self { pipeline, renderer }
    }

    /// Renders the current result of `flow`.
    ///
    /// Without a result the renderer is never called; the user gets a
    /// "nothing to export" notice instead.
    pub async fn export(&self, flow: FlowKind) -> Result<ExportedDocument, ExportError> {
        let result = match self.subject(flow) {
            Some(subject) => self.renderer.render(&subject).await,
            None => Err(ExportError::NothingToExport(flow)),
        };

        match &result {
            Ok(document) => {
                tracing::info!(%flow, format = %document.format, "Document exported");
            }
            Err(err) => {
                tracing::warn!(%flow, error = %err, "Export failed");
                self.pipeline.notify(NoticeLevel::Error, err.user_message());
            }
        }
        result
    }

    /// Renders and writes the document into `dir`.
    pub async fn export_to_dir(
        &self,
        flow: FlowKind,
        dir: impl AsRef<Path>,
    ) -> Result<PathBuf, ExportError> {
        let document = self.export(flow).await?;
        match document.write_to_dir(dir).await {
            Ok(path) => {
                self.pipeline.notify(
                    NoticeLevel::Success,
                    format!("Documento guardado en {}", path.display()),
                );
                Ok(path)
            }
            Err(err) => {
                tracing::error!(error = %err, "Could not write exported document");
                self.pipeline.notify(NoticeLevel::Error, err.user_message());
                Err(err)
            }
        }
    }

    fn subject(&self, flow: FlowKind) -> Option<ExportSubject> {
        match flow {
            FlowKind::QuickEstimate => self.pipeline.current_estimate().map(ExportSubject::Estimate),
            FlowKind::DetailedQuote => self.pipeline.current_quote().map(ExportSubject::Quote),
        }
    }
}
