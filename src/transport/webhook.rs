//! Webhook transport: one POST per user message, one reply per POST.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::Value;

use super::{TransportError, WebhookRequest, extract_reply};

/// Something that can turn a user message into a bot reply.
#[async_trait]
pub trait ReplyTransport: Send + Sync {
    /// Returns the name of the transport.
    fn name(&self) -> &str;

    /// Sends one message and resolves exactly once with the reply text.
    async fn send(&self, message: &str) -> Result<String, TransportError>;
}

/// Chat webhook (for example a workflow-automation trigger) reached over HTTP.
pub struct WebhookClient {
    endpoint: String,
    client: reqwest::Client,
}

impl WebhookClient {
    /// Builds a client for `endpoint`. The endpoint is used verbatim; a bad
    /// URL only shows up when a message is sent.
    pub fn new(endpoint: String, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReplyTransport for WebhookClient {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn send(&self, message: &str) -> Result<String, TransportError> {
        info!("Webhook request: {} bytes", message.len());

        // .json() sets Content-Type: application/json
        let response = self
            .client
            .post(&self.endpoint)
            .json(&WebhookRequest { message })
            .send()
            .await?;

        let status = response.status();
        debug!("Webhook response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Webhook error: {} - {}", status.as_u16(), body);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // A body that isn't JSON comes back as a decode error, i.e. Parse
        let body: Value = response.json().await?;

        let reply = extract_reply(&body);
        debug!("Webhook reply: {} bytes", reply.len());
        Ok(reply)
    }
}
