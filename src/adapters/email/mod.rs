//! Email adapters - implementations of the `EmailSender` port.

mod http_email_sender;

pub use http_email_sender::{HttpEmailSender, DEFAULT_SEND_PATH};
