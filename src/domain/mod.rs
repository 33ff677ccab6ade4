//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors, state machine, timestamps)
//! - `quote` - Quote requests, validation, response normalization and flow lifecycle

pub mod foundation;
pub mod quote;
