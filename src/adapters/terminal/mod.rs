//! Terminal adapters - the command-line UI.

mod presenter;

pub use presenter::TerminalPresenter;
