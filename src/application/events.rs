//! Events published by the quote pipeline.
//!
//! The UI layer is a thin renderer: it subscribes to these events and draws
//! whatever they describe. Nothing in the pipeline knows how it is drawn.

use serde::Serialize;

use crate::domain::quote::{Estimate, FlowKind, Quote};

/// How the user closed the result view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    CloseButton,
    Backdrop,
    EscapeKey,
    /// A new calculation replaced the view.
    Superseded,
}

/// Severity of a [`PipelineEvent::Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Something the UI should show or hide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// A request for `flow` is in flight.
    LoadingShown { flow: FlowKind, message: String },

    /// The request for `flow` resolved, one way or the other.
    LoadingHidden { flow: FlowKind },

    /// The form did not pass the gate for `flow`; no request was made.
    ValidationRejected {
        flow: FlowKind,
        message: String,
        fields: Vec<String>,
    },

    /// A quick estimate is ready and its result view is visible.
    EstimateReady { estimate: Estimate },

    /// A detailed quote is ready and its result view is visible.
    QuoteReady { quote: Quote },

    /// The pricing call failed.
    RequestFailed { flow: FlowKind, message: String },

    /// The result view for `flow` was closed. The result itself is kept.
    ResultDismissed { flow: FlowKind, reason: DismissReason },

    /// Short toast from export, share or email actions.
    Notice { level: NoticeLevel, message: String },
}

impl PipelineEvent {
    /// Flow the event belongs to, if any.
    pub fn flow(&self) -> Option<FlowKind> {
        match self {
            PipelineEvent::LoadingShown { flow, .. }
            | PipelineEvent::LoadingHidden { flow }
            | PipelineEvent::ValidationRejected { flow, .. }
            | PipelineEvent::RequestFailed { flow, .. }
            | PipelineEvent::ResultDismissed { flow, .. } => Some(*flow),
            PipelineEvent::EstimateReady { .. } => Some(FlowKind::QuickEstimate),
            PipelineEvent::QuoteReady { .. } => Some(FlowKind::DetailedQuote),
            PipelineEvent::Notice { .. } => None,
        }
    }
}
