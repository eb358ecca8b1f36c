//! Wire types for the webhook exchange.
//!
//! Request: `{"message": "..."}`. Response: a JSON array whose first element
//! may carry a string `output`. Anything else falls back to [`FALLBACK_REPLY`].

use serde::Serialize;
use serde_json::Value;

/// Reply shown when the webhook answers without usable `output`.
pub const FALLBACK_REPLY: &str = "Sorry, I didn't understand that. Could you please rephrase?";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WebhookRequest<'a> {
    pub message: &'a str,
}

/// Pulls `body[0].output` out of a webhook response.
///
/// Missing, empty, or non-string output yields the fallback, as does a body
/// that isn't an array.
pub fn extract_reply(body: &Value) -> String {
    body.get(0)
        .and_then(|first| first.get("output"))
        .and_then(Value::as_str)
        .filter(|output| !output.is_empty())
        .unwrap_or(FALLBACK_REPLY)
        .to_string()
}
