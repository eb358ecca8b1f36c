pub mod error;
pub mod types;
pub mod webhook;

pub use error::TransportError;
pub use types::{FALLBACK_REPLY, WebhookRequest, extract_reply};
pub use webhook::{ReplyTransport, WebhookClient};
