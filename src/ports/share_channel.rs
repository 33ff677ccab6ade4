//! Share Channel Port - hands a prefilled message link to the outside world.
//!
//! On a desktop the channel opens the link with the system handler; tests
//! record the link instead.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::quote::FlowKind;

/// Port for opening a messaging deep link.
#[async_trait]
pub trait ShareChannel: Send + Sync {
    /// Open `uri` in whatever handles it (browser, messaging app, ...).
    async fn open(&self, uri: &str) -> Result<(), ShareError>;
}

/// Errors that can occur while sharing a result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShareError {
    /// Share asked for before the flow produced a result.
    #[error("nothing to share: no {0} result yet")]
    NothingToShare(FlowKind),

    /// The handler could not be launched or exited with failure.
    #[error("failed to open share link: {0}")]
    OpenFailed(String),
}

impl ShareError {
    pub fn open_failed(reason: impl Into<String>) -> Self {
        Self::OpenFailed(reason.into())
    }

    /// Short text for the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::NothingToShare(flow) => flow.nothing_to_export_message().to_string(),
            Self::OpenFailed(_) => "No se pudo abrir WhatsApp. Intenta nuevamente.".to_string(),
        }
    }
}
