//! Remote PDF renderer - asks the backend to typeset the document.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::adapters::http_client::{build_client, endpoint_url};
use crate::ports::{DocumentRenderer, ExportError, ExportFormat, ExportSubject, ExportedDocument};

/// Renderer that POSTs the canonical record to the PDF endpoint and returns
/// the bytes it answers with.
#[derive(Debug, Clone)]
pub struct RemotePdfRenderer {
    client: Client,
    url: String,
}

impl RemotePdfRenderer {
    pub fn new(base_url: &str, pdf_path: &str, timeout: Duration) -> Result<Self, ExportError> {
        let client = build_client(timeout)
            .map_err(|e| ExportError::service_unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: endpoint_url(base_url, pdf_path),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DocumentRenderer for RemotePdfRenderer {
    async fn render(&self, subject: &ExportSubject) -> Result<ExportedDocument, ExportError> {
        let response = self
            .client
            .post(&self.url)
            .json(subject)
            .send()
            .await
            .map_err(|e| ExportError::service_unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "PDF endpoint rejected export");
            return Err(ExportError::service_unavailable(format!(
                "status {}: {}",
                status, body
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ExportError::render_failed(format!("reading PDF body: {}", e)))?;

        if bytes.is_empty() {
            return Err(ExportError::render_failed("PDF endpoint returned an empty body"));
        }

        Ok(ExportedDocument::from_pdf(bytes.to_vec(), subject.base_filename()))
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_pdf_path_onto_base_url() {
        let renderer = RemotePdfRenderer::new(
            "http://localhost:8000/",
            "/cotizar/descargar-pdf",
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(renderer.url(), "http://localhost:8000/cotizar/descargar-pdf");
        assert_eq!(renderer.format(), ExportFormat::Pdf);
    }
}
