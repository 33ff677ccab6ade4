//! Share channel that hands the link to a system opener (`xdg-open`, `open`).

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use crate::ports::{ShareChannel, ShareError};

/// Default opener on Linux desktops.
pub const DEFAULT_OPENER: &str = "xdg-open";

/// Spawns `program <uri>` and waits for it to exit.
#[derive(Debug, Clone)]
pub struct CommandShareChannel {
    program: String,
}

impl CommandShareChannel {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CommandShareChannel {
    fn default() -> Self {
        Self::new(DEFAULT_OPENER)
    }
}

#[async_trait]
impl ShareChannel for CommandShareChannel {
    async fn open(&self, uri: &str) -> Result<(), ShareError> {
        let status = Command::new(&self.program)
            .arg(uri)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| ShareError::open_failed(format!("Failed to start {}: {}", self.program, e)))?;

        if !status.success() {
            return Err(ShareError::open_failed(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        tracing::debug!(program = %self.program, "Share link handed to opener");
        Ok(())
    }
}
