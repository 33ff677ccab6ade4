//! Recording doubles for the export, share and email ports.
//!
//! Each records what it was asked to do and can be told to fail.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::ports::{
    DocumentRenderer, EmailError, EmailMessage, EmailSender, ExportError, ExportFormat,
    ExportSubject, ExportedDocument, ShareChannel, ShareError,
};

/// Renderer that records subjects and returns a tiny HTML document.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    rendered: Arc<Mutex<Vec<ExportSubject>>>,
    failure: Option<ExportError>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every render fails with `error`.
    pub fn failing(error: ExportError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn rendered(&self) -> Vec<ExportSubject> {
        self.rendered.lock().clone()
    }
}

#[async_trait]
impl DocumentRenderer for RecordingRenderer {
    async fn render(&self, subject: &ExportSubject) -> Result<ExportedDocument, ExportError> {
        self.rendered.lock().push(subject.clone());
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(ExportedDocument::from_html(
                format!("<p>{}</p>", subject.flow()),
                subject.base_filename(),
            )),
        }
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Html
    }
}

/// Share channel that records the links it was asked to open.
#[derive(Debug, Clone, Default)]
pub struct RecordingShareChannel {
    opened: Arc<Mutex<Vec<String>>>,
    failure: Option<ShareError>,
}

impl RecordingShareChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: ShareError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().clone()
    }
}

#[async_trait]
impl ShareChannel for RecordingShareChannel {
    async fn open(&self, uri: &str) -> Result<(), ShareError> {
        self.opened.lock().push(uri.to_string());
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

/// Email sender that records outgoing messages.
#[derive(Debug, Clone, Default)]
pub struct RecordingEmailSender {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    failure: Option<EmailError>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: EmailError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        self.sent.lock().push(message.clone());
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::Quote;

    #[tokio::test]
    async fn recording_renderer_records_and_renders() {
        let renderer = RecordingRenderer::new();
        let doc = renderer
            .render(&ExportSubject::Quote(Quote::default()))
            .await
            .unwrap();

        assert_eq!(doc.filename, "cotizacion-construccion.html");
        assert_eq!(renderer.rendered().len(), 1);
    }

    #[tokio::test]
    async fn failing_doubles_still_record() {
        let channel = RecordingShareChannel::failing(ShareError::open_failed("no handler"));
        assert!(channel.open("https://wa.me/1").await.is_err());
        assert_eq!(channel.opened(), vec!["https://wa.me/1".to_string()]);

        let sender = RecordingEmailSender::failing(EmailError::transport("down"));
        let message = EmailMessage::new("a@b.co", "s", "<p>h</p>");
        assert!(sender.send(&message).await.is_err());
        assert_eq!(sender.sent(), vec![message]);
    }
}
