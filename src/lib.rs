//! Construction Quoter - quick estimates and detailed construction quotes.
//!
//! This crate validates a project form, calls the remote pricing calculator,
//! normalizes whatever shape it answers with, and hands the result to export
//! and share collaborators.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
