//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::state::App;
use crate::transport::{ReplyTransport, TransportError};

/// A transport for tests that never expect a real call.
pub struct NoopTransport;

#[async_trait]
impl ReplyTransport for NoopTransport {
    fn name(&self) -> &str {
        "noop"
    }

    async fn send(&self, _message: &str) -> Result<String, TransportError> {
        Ok(String::new())
    }
}

/// Replies with a fixed string and remembers every message it was given.
pub struct RecordingTransport {
    reply: String,
    sent: Mutex<Vec<String>>,
}

impl RecordingTransport {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ReplyTransport for RecordingTransport {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, message: &str) -> Result<String, TransportError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message.to_string());
        }
        Ok(self.reply.clone())
    }
}

/// Always fails with a network error.
pub struct FailingTransport;

impl FailingTransport {
    pub fn network() -> Self {
        Self
    }
}

#[async_trait]
impl ReplyTransport for FailingTransport {
    fn name(&self) -> &str {
        "failing"
    }

    async fn send(&self, _message: &str) -> Result<String, TransportError> {
        Err(TransportError::Network("connection refused".to_string()))
    }
}

/// Creates a test App with a NoopTransport and no greeting turn.
pub fn test_app() -> App {
    App::new(Arc::new(NoopTransport), "")
}
