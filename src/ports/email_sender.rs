//! Email Sender Port - delivers a rendered quote to the client's inbox.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// One outgoing email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            html: html.into(),
        }
    }
}

/// Port for the outbound email relay.
///
/// Delivery is best-effort: the quote flow has already succeeded by the time
/// an email goes out, so callers log failures rather than surface them as
/// flow errors.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError>;
}

/// Errors that can occur while emailing a quote.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmailError {
    /// No email sender is configured.
    #[error("email delivery is disabled")]
    Disabled,

    /// No quote has been produced yet.
    #[error("no quote to send")]
    NothingToSend,

    /// The quote carries no client email.
    #[error("quote has no recipient email")]
    MissingRecipient,

    /// The relay could not be reached or rejected the message.
    #[error("email transport failed: {0}")]
    Transport(String),
}

impl EmailError {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport(reason.into())
    }

    /// Short text for the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Disabled => "El envío por email no está habilitado.",
            Self::NothingToSend => "No hay ninguna cotización para enviar todavía.",
            Self::MissingRecipient => "La cotización no tiene un email de destino.",
            Self::Transport(_) => "No se pudo enviar la cotización por email.",
        }
    }
}
