//! QuoteSharer - WhatsApp hand-off and quote email for the current result.

use std::sync::Arc;

use super::events::NoticeLevel;
use super::messages::{
    build_estimate_share_message, build_quote_email_html, build_share_message,
    quote_email_subject, whatsapp_link,
};
use super::pipeline::QuotePipeline;
use crate::domain::quote::FlowKind;
use crate::ports::{EmailError, EmailMessage, EmailSender, ShareChannel, ShareError};

/// Where share links point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareTarget {
    pub messaging_base_url: String,
    pub whatsapp_number: String,
}

/// Shares the pipeline's current results.
///
/// # Dependencies
///
/// - `QuotePipeline`: owner of the current results
/// - `ShareChannel`: opens the messaging link
/// - `EmailSender` (optional): quote delivery by email
pub struct QuoteSharer {
    pipeline: Arc<QuotePipeline>,
    channel: Arc<dyn ShareChannel>,
    email: Option<Arc<dyn EmailSender>>,
    target: ShareTarget,
}

impl QuoteSharer {
    pub fn new(
        pipeline: Arc<QuotePipeline>,
        channel: Arc<dyn ShareChannel>,
        target: ShareTarget,
    ) -> Self {
        Self {
            pipeline,
            channel,
            email: None,
            target,
        }
    }

    /// Enables [`QuoteSharer::send_quote_email`].
    pub fn with_email_sender(mut self, sender: Arc<dyn EmailSender>) -> Self {
        self.email = Some(sender);
        self
    }

    /// Opens WhatsApp with the current quote. Returns the link that was opened.
    pub async fn share_quote(&self) -> Result<String, ShareError> {
        let message = self
            .pipeline
            .current_quote()
            .map(|quote| build_share_message(&quote));
        self.open(FlowKind::DetailedQuote, message).await
    }

    /// Opens WhatsApp with the current quick estimate.
    pub async fn share_estimate(&self) -> Result<String, ShareError> {
        let message = self
            .pipeline
            .current_estimate()
            .map(|estimate| build_estimate_share_message(&estimate));
        self.open(FlowKind::QuickEstimate, message).await
    }

    /// Emails the current quote to the client.
    pub async fn send_quote_email(&self) -> Result<(), EmailError> {
        let result = self.try_send_quote_email().await;
        match &result {
            Ok(()) => self.pipeline.notify(
                NoticeLevel::Success,
                "Cotización enviada por email automáticamente",
            ),
            Err(err) => {
                tracing::warn!(error = %err, "Quote email not sent");
                self.pipeline.notify(NoticeLevel::Error, err.user_message());
            }
        }
        result
    }

    async fn try_send_quote_email(&self) -> Result<(), EmailError> {
        let sender = self.email.as_ref().ok_or(EmailError::Disabled)?;
        let quote = self.pipeline.current_quote().ok_or(EmailError::NothingToSend)?;
        let to = quote.recipient_email().ok_or(EmailError::MissingRecipient)?;

        let message = EmailMessage::new(
            to,
            quote_email_subject(&quote),
            build_quote_email_html(&quote),
        );
        sender.send(&message).await
    }

    async fn open(&self, flow: FlowKind, message: Option<String>) -> Result<String, ShareError> {
        let Some(message) = message else {
            let err = ShareError::NothingToShare(flow);
            self.pipeline.notify(NoticeLevel::Error, err.user_message());
            return Err(err);
        };

        let link = whatsapp_link(
            &self.target.messaging_base_url,
            &self.target.whatsapp_number,
            &message,
        );

        match self.channel.open(&link).await {
            Ok(()) => {
                tracing::info!(%flow, "Share link opened");
                Ok(link)
            }
            Err(err) => {
                tracing::warn!(%flow, error = %err, "Share link could not be opened");
                self.pipeline.notify(NoticeLevel::Error, err.user_message());
                Err(err)
            }
        }
    }
}
