//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the quote pipeline to external systems:
//! - `pricing` - reqwest client for the remote calculator
//! - `document` - print-ready HTML and remote PDF renderers
//! - `share` - system opener for messaging links
//! - `email` - backend email relay
//! - `terminal` - text presenter for pipeline events
//! - `mock` - in-memory doubles for tests

pub mod document;
pub mod email;
pub mod http_client;
pub mod mock;
pub mod pricing;
pub mod share;
pub mod terminal;
