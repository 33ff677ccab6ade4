//! Markdown template for printable estimates and quotes.
//!
//! The layout is fixed: company header, issue date, project summary, cost
//! breakdown (quotes only), total, validity note and contact footer. Values
//! coming from the pricing service are escaped before they reach the
//! markdown so they can never inject markup.

use crate::domain::foundation::Timestamp;
use crate::domain::quote::{Estimate, Quote};
use crate::ports::ExportSubject;

/// Shown in place of an empty breakdown.
pub const EMPTY_BREAKDOWN_TEXT: &str = "No hay desglose de costos disponible.";

const QUOTE_VALIDITY_NOTE: &str = "Esta cotización es válida por 30 días desde la fecha de \
emisión. Los precios están sujetos a cambios sin previo aviso.";

const ESTIMATE_NOTE: &str = "Esta es una estimación rápida basada en parámetros estándar. \
Para una cotización detallada con materiales específicos, contacta con nuestro equipo de ventas.";

/// Company details printed on every document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentBranding {
    pub company_name: String,
    pub tagline: String,
    pub contact_line: Option<String>,
}

impl Default for DocumentBranding {
    fn default() -> Self {
        Self {
            company_name: "SUMPETROL".to_string(),
            tagline: "Construcción y Servicios Industriales".to_string(),
            contact_line: Some(
                "Email: ventas@sumpetrol.com.ar | Teléfono: +54 9 261 7110120".to_string(),
            ),
        }
    }
}

/// Renders an [`ExportSubject`] as a markdown document.
#[derive(Debug, Clone, Default)]
pub struct QuoteDocumentTemplate {
    branding: DocumentBranding,
}

impl QuoteDocumentTemplate {
    pub fn new(branding: DocumentBranding) -> Self {
        Self { branding }
    }

    pub fn branding(&self) -> &DocumentBranding {
        &self.branding
    }

    /// Document title, also used as the HTML `<title>`.
    pub fn title(&self, subject: &ExportSubject) -> String {
        let kind = match subject {
            ExportSubject::Estimate(_) => "Estimación Rápida de Construcción",
            ExportSubject::Quote(_) => "Cotización Completa de Construcción",
        };
        format!("{} - {}", kind, self.branding.company_name)
    }

    /// Generates the full markdown for `subject`, dated `issued`.
    pub fn render(&self, subject: &ExportSubject, issued: Timestamp) -> String {
        let mut doc = self.generate_header(subject, issued);

        match subject {
            ExportSubject::Estimate(estimate) => {
                doc.push_str(&self.generate_estimate_summary(estimate));
                doc.push_str(&generate_total(&estimate.estimated_cost));
                doc.push_str(&generate_note(ESTIMATE_NOTE));
            }
            ExportSubject::Quote(quote) => {
                doc.push_str(&self.generate_quote_summary(quote));
                doc.push_str(&generate_breakdown(quote));
                doc.push_str(&generate_total(&quote.total_cost));
                doc.push_str(&generate_note(QUOTE_VALIDITY_NOTE));
            }
        }

        doc.push_str(&self.generate_footer());
        doc
    }

    fn generate_header(&self, subject: &ExportSubject, issued: Timestamp) -> String {
        let heading = match subject {
            ExportSubject::Estimate(_) => "Estimación Rápida de Construcción",
            ExportSubject::Quote(_) => "Cotización Completa de Construcción",
        };
        format!(
            "# {}\n\n## {}\n\n*Generado el {}*\n\n",
            escape(&self.branding.company_name),
            heading,
            issued.to_local_date_string()
        )
    }

    fn generate_estimate_summary(&self, estimate: &Estimate) -> String {
        summary_table(&[
            ("Área del Proyecto", &estimate.area),
            ("Tipo de Construcción", &estimate.construction_type),
            ("Tipo de Uso", &estimate.usage_type),
            ("Nivel de Terminación", &estimate.finish_level),
            ("Ubicación", &estimate.location),
            ("Costo Estimado", &estimate.estimated_cost),
            ("Tiempo Estimado", &estimate.estimated_time),
        ])
    }

    fn generate_quote_summary(&self, quote: &Quote) -> String {
        summary_table(&[
            ("Cliente", &quote.client_name),
            ("Tipo", &quote.construction_type),
            ("Uso", &quote.usage_type),
            ("Área", &quote.area),
            ("Pisos", &quote.floors),
            ("Terminación", &quote.finish_level),
            ("Ubicación", &quote.location),
            ("Tiempo", &quote.estimated_time),
            ("Fecha de cotización", &quote.quote_date),
            ("Válida hasta", &quote.valid_until),
        ])
    }

    fn generate_footer(&self) -> String {
        let mut footer = format!(
            "---\n\n**{}** - {}\n\n",
            escape(&self.branding.company_name),
            escape(&self.branding.tagline)
        );
        if let Some(contact) = &self.branding.contact_line {
            footer.push_str(&format!("{}\n", escape(contact)));
        }
        footer
    }
}

fn summary_table(rows: &[(&str, &String)]) -> String {
    let mut section = String::from("## Resumen del Proyecto\n\n");
    section.push_str("| Concepto | Detalle |\n");
    section.push_str("|----------|---------|\n");
    for (label, value) in rows {
        section.push_str(&format!("| {} | {} |\n", label, escape(value)));
    }
    section.push('\n');
    section
}

fn generate_breakdown(quote: &Quote) -> String {
    let mut section = String::from("## Desglose de Costos\n\n");

    if quote.breakdown.is_empty() {
        section.push_str(EMPTY_BREAKDOWN_TEXT);
        section.push_str("\n\n");
        return section;
    }

    section.push_str("| Categoría | Costo |\n");
    section.push_str("|-----------|-------|\n");
    for item in &quote.breakdown {
        section.push_str(&format!(
            "| {} | {} |\n",
            escape(&item.category),
            escape(&item.cost)
        ));
    }
    section.push('\n');
    section
}

fn generate_total(total: &str) -> String {
    format!("## Total Estimado\n\n**{}**\n\n", escape(total))
}

fn generate_note(note: &str) -> String {
    format!("> **Nota:** {}\n\n", note)
}

/// Escapes a value for use inside markdown (including table cells), then
/// neutralizes any HTML it carries.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}
