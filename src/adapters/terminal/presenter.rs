//! Terminal presenter - draws pipeline events as plain text.

use std::io::{self, Write};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::adapters::document::EMPTY_BREAKDOWN_TEXT;
use crate::application::{NoticeLevel, PipelineEvent};
use crate::domain::quote::{Estimate, Quote};

/// Renders [`PipelineEvent`]s to any writer (stdout in the CLI).
pub struct TerminalPresenter<W: Write> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render(&mut self, event: &PipelineEvent) -> io::Result<()> {
        match event {
            PipelineEvent::LoadingShown { message, .. } => writeln!(self.out, "⏳ {}", message)?,
            PipelineEvent::LoadingHidden { .. } => {}
            PipelineEvent::ValidationRejected { message, .. } => {
                writeln!(self.out, "⚠️  {}", message)?
            }
            PipelineEvent::EstimateReady { estimate } => self.render_estimate(estimate)?,
            PipelineEvent::QuoteReady { quote } => self.render_quote(quote)?,
            PipelineEvent::RequestFailed { message, .. } => writeln!(self.out, "❌ {}", message)?,
            PipelineEvent::ResultDismissed { .. } => writeln!(self.out, "(resultado cerrado)")?,
            PipelineEvent::Notice { level, message } => match level {
                NoticeLevel::Success => writeln!(self.out, "✅ {}", message)?,
                NoticeLevel::Error => writeln!(self.out, "❌ {}", message)?,
            },
        }
        self.out.flush()
    }

    fn render_estimate(&mut self, estimate: &Estimate) -> io::Result<()> {
        writeln!(self.out, "\n=== Estimación Rápida ===")?;
        self.row("Área", &estimate.area)?;
        self.row("Tipo de construcción", &estimate.construction_type)?;
        self.row("Tipo de uso", &estimate.usage_type)?;
        self.row("Nivel de terminación", &estimate.finish_level)?;
        self.row("Ubicación", &estimate.location)?;
        self.row("Costo estimado", &estimate.estimated_cost)?;
        self.row("Tiempo estimado", &estimate.estimated_time)?;
        writeln!(self.out)
    }

    fn render_quote(&mut self, quote: &Quote) -> io::Result<()> {
        writeln!(self.out, "\n=== Cotización Completa ===")?;
        self.row("Cliente", &quote.client_name)?;
        self.row("Tipo de construcción", &quote.construction_type)?;
        self.row("Tipo de uso", &quote.usage_type)?;
        self.row("Área", &quote.area)?;
        self.row("Pisos", &quote.floors)?;
        self.row("Nivel de terminación", &quote.finish_level)?;
        self.row("Ubicación", &quote.location)?;
        self.row("Tiempo estimado", &quote.estimated_time)?;

        writeln!(self.out, "\n--- Desglose de Costos ---")?;
        if quote.breakdown.is_empty() {
            writeln!(self.out, "  {}", EMPTY_BREAKDOWN_TEXT)?;
        }
        for item in &quote.breakdown {
            self.row(&item.category, &item.cost)?;
        }

        writeln!(self.out)?;
        self.row("TOTAL ESTIMADO", &quote.total_cost)?;
        writeln!(self.out)
    }

    fn row(&mut self, label: &str, value: &str) -> io::Result<()> {
        writeln!(self.out, "  {:<22} {}", format!("{}:", label), value)
    }
}

impl<W: Write + Send + 'static> TerminalPresenter<W> {
    /// Renders events until the pipeline is dropped.
    pub async fn run(mut self, mut events: broadcast::Receiver<PipelineEvent>) -> W {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Err(err) = self.render(&event) {
                        tracing::warn!(error = %err, "Presenter could not write event");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Presenter lagged behind pipeline events");
                }
                Err(RecvError::Closed) => break,
            }
        }
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::{BreakdownItem, FlowKind};

    fn rendered(events: &[PipelineEvent]) -> String {
        let mut presenter = TerminalPresenter::new(Vec::new());
        for event in events {
            presenter.render(event).unwrap();
        }
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn quote_view_lists_fields_and_breakdown_in_order() {
        let quote = Quote {
            client_name: "Ana".to_string(),
            client_email: "ana@example.com".to_string(),
            total_cost: "$50000".to_string(),
            breakdown: vec![
                BreakdownItem::new("Materiales", "$30000"),
                BreakdownItem::new("Mano de Obra", "$20000"),
            ],
            ..Quote::default()
        };
        let out = rendered(&[PipelineEvent::QuoteReady { quote }]);

        assert!(out.contains("Cliente:"));
        assert!(out.contains("Ana"));
        assert!(out.find("Materiales").unwrap() < out.find("Mano de Obra").unwrap());
        assert!(out.contains("$50000"));
        assert!(!out.contains("ana@example.com"));
    }

    #[test]
    fn empty_breakdown_shows_placeholder() {
        let out = rendered(&[PipelineEvent::QuoteReady {
            quote: Quote::default(),
        }]);
        assert!(out.contains(EMPTY_BREAKDOWN_TEXT));
    }

    #[test]
    fn estimate_view_shows_sentinels() {
        let out = rendered(&[PipelineEvent::EstimateReady {
            estimate: Estimate::default(),
        }]);
        assert_eq!(out.matches("N/A").count(), 7);
    }

    #[test]
    fn loading_and_failure_messages() {
        let out = rendered(&[
            PipelineEvent::LoadingShown {
                flow: FlowKind::QuickEstimate,
                message: FlowKind::QuickEstimate.loading_message().to_string(),
            },
            PipelineEvent::LoadingHidden {
                flow: FlowKind::QuickEstimate,
            },
            PipelineEvent::RequestFailed {
                flow: FlowKind::QuickEstimate,
                message: FlowKind::QuickEstimate.failure_message().to_string(),
            },
        ]);
        assert!(out.contains("Calculando estimación rápida..."));
        assert!(out.contains("Error al calcular la estimación rápida"));
    }

    #[tokio::test]
    async fn run_stops_when_channel_closes() {
        let (tx, rx) = broadcast::channel(8);
        tx.send(PipelineEvent::Notice {
            level: NoticeLevel::Success,
            message: "listo".to_string(),
        })
        .unwrap();
        drop(tx);

        let out = TerminalPresenter::new(Vec::new()).run(rx).await;
        assert!(String::from_utf8(out).unwrap().contains("✅ listo"));
    }
}
