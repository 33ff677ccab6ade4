//! Document adapters - implementations of the `DocumentRenderer` port.
//!
//! - `PrintHtmlRenderer` - Local print-ready HTML page (markdown + pulldown-cmark)
//! - `RemotePdfRenderer` - Server-side PDF generation over HTTP

mod print_html_renderer;
mod quote_template;
mod remote_pdf_renderer;

pub use print_html_renderer::PrintHtmlRenderer;
pub use quote_template::{DocumentBranding, QuoteDocumentTemplate, EMPTY_BREAKDOWN_TEXT};
pub use remote_pdf_renderer::RemotePdfRenderer;
