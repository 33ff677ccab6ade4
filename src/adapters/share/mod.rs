//! Share adapters - implementations of the `ShareChannel` port.

mod command_share_channel;

pub use command_share_channel::{CommandShareChannel, DEFAULT_OPENER};
