//! The two calculation flows and the lifecycle each of them walks through.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Which calculation a trigger asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    /// Minimal input, coarse cost and time.
    QuickEstimate,
    /// Full input, itemized breakdown.
    DetailedQuote,
}

impl FlowKind {
    /// Text shown next to the loading indicator.
    pub fn loading_message(&self) -> &'static str {
        match self {
            FlowKind::QuickEstimate => "Calculando estimación rápida...",
            FlowKind::DetailedQuote => "Calculando cotización completa...",
        }
    }

    /// Text shown when the form does not pass validation.
    pub fn validation_message(&self) -> &'static str {
        match self {
            FlowKind::QuickEstimate => {
                "Por favor completa los campos requeridos para la estimación rápida."
            }
            FlowKind::DetailedQuote => "Por favor completa todos los campos requeridos.",
        }
    }

    /// Generic text shown when the pricing service call fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            FlowKind::QuickEstimate => {
                "Error al calcular la estimación rápida. Intenta nuevamente."
            }
            FlowKind::DetailedQuote => {
                "Error al calcular la cotización completa. Intenta nuevamente."
            }
        }
    }

    /// Text shown when export or share is asked for before any result exists.
    pub fn nothing_to_export_message(&self) -> &'static str {
        match self {
            FlowKind::QuickEstimate => "No hay ninguna estimación para exportar todavía.",
            FlowKind::DetailedQuote => "No hay ninguna cotización para exportar todavía.",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlowKind::QuickEstimate => "quick_estimate",
            FlowKind::DetailedQuote => "detailed_quote",
        };
        write!(f, "{}", s)
    }
}

/// Lifecycle of a single flow.
///
/// `Idle -> Validating -> Submitting -> (Success | Failed) -> Idle`, with a
/// shortcut `Validating -> Idle` when the form is rejected locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

impl FlowState {
    /// True while the loading indicator for this flow should be visible.
    pub fn is_loading(&self) -> bool {
        matches!(self, FlowState::Submitting)
    }
}

impl StateMachine for FlowState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use FlowState::*;
        matches!(
            (self, target),
            (Idle, Validating)
                | (Validating, Idle)
                | (Validating, Submitting)
                | (Submitting, Success)
                | (Submitting, Failed)
                | (Success, Idle)
                | (Failed, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use FlowState::*;
        match self {
            Idle => vec![Validating],
            Validating => vec![Idle, Submitting],
            Submitting => vec![Success, Failed],
            Success => vec![Idle],
            Failed => vec![Idle],
        }
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlowState::Idle => "Idle",
            FlowState::Validating => "Validating",
            FlowState::Submitting => "Submitting",
            FlowState::Success => "Success",
            FlowState::Failed => "Failed",
        };
        write!(f, "{}", s)
    }
}
