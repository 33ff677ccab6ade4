//! Application layer - the quote pipeline and the services that consume
//! its results.
//!
//! This layer orchestrates domain operations and coordinates between ports.

mod events;
mod export;
mod messages;
mod pipeline;
mod share;

pub use events::{DismissReason, NoticeLevel, PipelineEvent};
pub use export::QuoteExporter;
pub use messages::{
    build_estimate_share_message, build_quote_email_html, build_share_message, digits_only,
    quote_email_subject, whatsapp_link,
};
pub use pipeline::{FlowOutcome, QuotePipeline, EVENT_CHANNEL_CAPACITY};
pub use share::{QuoteSharer, ShareTarget};
