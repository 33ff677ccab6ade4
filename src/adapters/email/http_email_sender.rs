//! HTTP email relay - POSTs `{to, subject, html}` to the backend mailer.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::adapters::http_client::{build_client, endpoint_url};
use crate::ports::{EmailError, EmailMessage, EmailSender};

/// Default relay endpoint.
pub const DEFAULT_SEND_PATH: &str = "/api/email/send";

#[derive(Debug, Clone)]
pub struct HttpEmailSender {
    client: Client,
    url: String,
}

impl HttpEmailSender {
    pub fn new(base_url: &str, send_path: &str, timeout: Duration) -> Result<Self, EmailError> {
        let client = build_client(timeout)
            .map_err(|e| EmailError::transport(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: endpoint_url(base_url, send_path),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        let response = self
            .client
            .post(&self.url)
            .json(message)
            .send()
            .await
            .map_err(|e| EmailError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::transport(format!("status {}: {}", status, body)));
        }

        tracing::info!("Quote email accepted by relay");
        Ok(())
    }
}
