//! Print-ready HTML renderer.
//!
//! Builds the markdown document with [`QuoteDocumentTemplate`] and converts it
//! with `pulldown-cmark`. The resulting page is styled for the browser's
//! "print to PDF", which is how the document reaches the user as a PDF.

use async_trait::async_trait;
use pulldown_cmark::{html, Options, Parser};

use super::quote_template::{DocumentBranding, QuoteDocumentTemplate};
use crate::domain::foundation::Timestamp;
use crate::ports::{DocumentRenderer, ExportError, ExportFormat, ExportSubject, ExportedDocument};

/// Local renderer producing a standalone HTML page.
///
/// # Example
///
/// ```rust,ignore
/// let renderer = PrintHtmlRenderer::new(DocumentBranding::default());
/// let document = renderer.render(&ExportSubject::Quote(quote)).await?;
/// assert_eq!(document.format, ExportFormat::Html);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrintHtmlRenderer {
    template: QuoteDocumentTemplate,
}

impl PrintHtmlRenderer {
    pub fn new(branding: DocumentBranding) -> Self {
        Self {
            template: QuoteDocumentTemplate::new(branding),
        }
    }

    /// Renders `subject` as of `issued`. Split out so the date is testable.
    pub fn render_at(&self, subject: &ExportSubject, issued: Timestamp) -> String {
        let markdown = self.template.render(subject, issued);

        let parser = Parser::new_ext(&markdown, Options::ENABLE_TABLES);
        let mut body = String::new();
        html::push_html(&mut body, parser);

        wrap_html(body, &self.template.title(subject))
    }
}

#[async_trait]
impl DocumentRenderer for PrintHtmlRenderer {
    async fn render(&self, subject: &ExportSubject) -> Result<ExportedDocument, ExportError> {
        let page = self.render_at(subject, Timestamp::now());
        tracing::debug!(flow = %subject.flow(), bytes = page.len(), "Rendered print page");
        Ok(ExportedDocument::from_html(page, subject.base_filename()))
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Html
    }
}

/// Wrap HTML content in a complete document with print styling.
fn wrap_html(body: String, title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <article class="quote-document">
{body}
    </article>
</body>
</html>"#,
        title = html_escape(title),
        css = PRINT_CSS,
        body = body
    )
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const PRINT_CSS: &str = r#"
:root {
    --brand-color: #6B2E3A;
    --text-color: #1f2937;
    --muted-color: #666666;
    --border-color: #e5e7eb;
    --panel-bg: #f8f9fa;
    --note-bg: #fff3cd;
    --note-border: #ffc107;
}

body {
    font-family: Arial, sans-serif;
    color: var(--text-color);
    max-width: 800px;
    margin: 0 auto;
    padding: 20px;
}

h1, h2 {
    color: var(--brand-color);
    text-align: center;
    margin: 0.25em 0;
}

h1 + h2 + p {
    text-align: center;
    color: var(--muted-color);
}

article h2:not(:first-of-type) {
    text-align: left;
    font-size: 1.2rem;
    border-bottom: 1px solid var(--border-color);
    margin-top: 1.5em;
}

table {
    width: 100%;
    border-collapse: collapse;
    background-color: var(--panel-bg);
    margin: 1em 0;
}

th, td {
    padding: 0.5rem;
    text-align: left;
    border: 1px solid var(--border-color);
}

blockquote {
    margin: 1.5em 0;
    padding: 15px;
    background-color: var(--note-bg);
    border-left: 4px solid var(--note-border);
}

blockquote p {
    margin: 0;
}

hr {
    border: none;
    border-top: 1px solid var(--border-color);
    margin: 2em 0 1em;
}

hr ~ p {
    text-align: center;
    color: var(--muted-color);
}

@media print {
    body {
        margin: 0;
        padding: 0;
    }

    @page {
        margin: 1cm;
    }

    table, blockquote {
        page-break-inside: avoid;
    }
}
"#;

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::{BreakdownItem, Estimate, Quote};

    fn issued() -> Timestamp {
        Timestamp::from_unix_millis(1_710_504_000_000).unwrap()
    }

    #[test]
    fn renders_complete_html_page() {
        let renderer = PrintHtmlRenderer::default();
        let html = renderer.render_at(&ExportSubject::Quote(Quote::default()), issued());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Cotización Completa de Construcción - SUMPETROL</title>"));
        assert!(html.contains("<h1>SUMPETROL</h1>"));
        assert!(html.contains("Generado el 15/03/2024"));
        assert!(html.contains("@media print"));
    }

    #[test]
    fn breakdown_renders_as_table() {
        let quote = Quote {
            breakdown: vec![BreakdownItem::new("Instalaciones", "U$D 18,720")],
            ..Quote::default()
        };
        let html = PrintHtmlRenderer::default().render_at(&ExportSubject::Quote(quote), issued());

        assert!(html.contains("<table>"));
        assert!(html.contains("<td>Instalaciones</td>"));
        assert!(html.contains("<td>U$D 18,720</td>"));
    }

    #[test]
    fn service_values_cannot_inject_markup() {
        let estimate = Estimate {
            construction_type: "<script>alert(1)</script>".to_string(),
            ..Estimate::default()
        };
        let html =
            PrintHtmlRenderer::default().render_at(&ExportSubject::Estimate(estimate), issued());

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[tokio::test]
    async fn render_produces_html_document() {
        let renderer = PrintHtmlRenderer::default();
        let doc = renderer
            .render(&ExportSubject::Estimate(Estimate::default()))
            .await
            .unwrap();

        assert_eq!(doc.format, ExportFormat::Html);
        assert_eq!(doc.filename, "estimacion-rapida.html");
        assert_eq!(renderer.format(), ExportFormat::Html);
    }
}
