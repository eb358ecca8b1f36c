//! # Application State
//!
//! Core chat state. Domain data only; presentation state (scroll position,
//! animation) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── transport: Arc<dyn ReplyTransport>  // where messages go
//! ├── log: MessageLog                     // append-only chat turns
//! ├── input: InputBuffer                  // text being composed
//! ├── in_flight: Option<u64>              // outstanding request id (pending)
//! ├── last_error: Option<String>          // user-facing failure text
//! ├── next_request_id: u64                // id for the next transport call
//! └── ui: UiText                          // header/placeholder strings
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::chat::MessageLog;
use crate::core::config::ResolvedConfig;
use crate::core::input::InputBuffer;
use crate::transport::ReplyTransport;

/// Where the submission lifecycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting submissions.
    Idle,
    /// A transport call is outstanding; submissions and edits are ignored.
    Awaiting,
}

/// Fixed strings for the header and input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiText {
    pub title: String,
    pub status: String,
    pub placeholder: String,
}

impl Default for UiText {
    fn default() -> Self {
        Self {
            title: crate::core::config::DEFAULT_TITLE.to_string(),
            status: crate::core::config::DEFAULT_STATUS.to_string(),
            placeholder: crate::core::config::DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

pub struct App {
    pub transport: Arc<dyn ReplyTransport>,
    pub log: MessageLog,
    pub input: InputBuffer,
    pub last_error: Option<String>,
    pub ui: UiText,
    /// Id of the outstanding transport call. `Some` exactly while pending.
    pub(crate) in_flight: Option<u64>,
    pub(crate) next_request_id: u64,
}

impl App {
    /// Creates an empty chat. A non-empty `greeting` becomes the first bot turn.
    pub fn new(transport: Arc<dyn ReplyTransport>, greeting: &str) -> Self {
        let mut log = MessageLog::new();
        if !greeting.is_empty() {
            log.push_bot(greeting.to_string());
        }
        Self {
            transport,
            log,
            input: InputBuffer::new(),
            last_error: None,
            ui: UiText::default(),
            in_flight: None,
            next_request_id: 1,
        }
    }

    pub fn from_config(transport: Arc<dyn ReplyTransport>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(transport, &config.greeting);
        app.ui = UiText {
            title: config.title.clone(),
            status: config.status.clone(),
            placeholder: config.placeholder.clone(),
        };
        app
    }

    /// True from submission until the transport call settles.
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn phase(&self) -> Phase {
        if self.is_pending() {
            Phase::Awaiting
        } else {
            Phase::Idle
        }
    }

    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.phase(), Phase::Idle);
        assert!(!app.is_pending());
        assert!(app.last_error.is_none());
        assert!(app.input.is_empty());
        assert!(app.log.is_empty());
        assert_eq!(app.ui.title, "AI Assistant");
    }

    #[test]
    fn test_greeting_becomes_first_bot_turn() {
        let app = App::new(
            Arc::new(crate::test_support::NoopTransport),
            "Hello! How can I help?",
        );
        assert_eq!(app.log.len(), 1);
        let first = app.log.get(0).unwrap();
        assert_eq!(first.sender, crate::core::chat::Sender::Bot);
        assert_eq!(first.content, "Hello! How can I help?");
    }
}
