//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the quote pipeline and the outside world. Adapters implement these ports.
//!
//! - `PricingService` - Remote calculator for estimates and quotes
//! - `DocumentRenderer` - Printable / downloadable documents
//! - `ShareChannel` - Messaging deep links
//! - `EmailSender` - Quote delivery by email

mod document_renderer;
mod email_sender;
mod pricing_service;
mod share_channel;

pub use document_renderer::{
    DocumentRenderer, ExportError, ExportFormat, ExportSubject, ExportedDocument,
};
pub use email_sender::{EmailError, EmailMessage, EmailSender};
pub use pricing_service::{calculate, PricingError, PricingService};
pub use share_channel::{ShareChannel, ShareError};
