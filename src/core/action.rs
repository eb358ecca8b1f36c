//! # Actions
//!
//! Everything that can happen in hookchat becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! Webhook answers? That's `Action::ReplySettled { .. }`.
//!
//! `update()` applies an action to the state and returns the side effect the
//! event loop should perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Submission lifecycle
//!
//! ```text
//!            Submit (non-empty)              ReplySettled (matching id)
//!   Idle ─────────────────────────▶ Awaiting ───────────────────────────▶ Idle
//!    ▲  Submit (empty) = no-op         │  Submit / Edit = no-op
//!    └─────────────────────────────────┘
//! ```

use log::{debug, error, info, warn};

use crate::core::input::InputEdit;
use crate::core::state::App;
use crate::transport::TransportError;

/// Shown when the webhook could not be reached.
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Connection error. Please check your internet connection and try again.";
/// Shown for every other failure (bad status, unreadable body).
pub const GENERIC_ERROR_MESSAGE: &str =
    "Sorry, something went wrong. Please try again in a moment.";

#[derive(Debug)]
pub enum Action {
    /// Edit the input buffer.
    Edit(InputEdit),
    /// Send the current input (Enter / send control).
    Submit,
    /// The transport call identified by `request_id` finished.
    ReplySettled {
        request_id: u64,
        outcome: Result<String, TransportError>,
    },
    Quit,
}

/// A message that must be sent to the webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub request_id: u64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Issue exactly one transport call.
    SendMessage(OutboundMessage),
    Quit,
}

/// Maps a transport failure to the text shown in the chat.
pub fn user_facing_error(err: &TransportError) -> &'static str {
    if err.is_connectivity() {
        CONNECTION_ERROR_MESSAGE
    } else {
        GENERIC_ERROR_MESSAGE
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Edit(edit) => {
            if app.is_pending() {
                debug!("Ignoring edit while awaiting reply");
            } else {
                app.input.apply(edit);
            }
            Effect::None
        }
        Action::Submit => submit(app),
        Action::ReplySettled {
            request_id,
            outcome,
        } => {
            settle(app, request_id, outcome);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App) -> Effect {
    if let Some(request_id) = app.in_flight {
        debug!("Submit ignored: request {request_id} still pending");
        return Effect::None;
    }

    let Some(message) = app.input.trimmed().map(str::to_string) else {
        return Effect::None;
    };

    let request_id = app.next_request_id;
    app.next_request_id += 1;

    app.log.push_user(message.clone());
    app.input.clear();
    app.last_error = None;
    app.in_flight = Some(request_id);

    info!("Submitting request {request_id} ({} bytes)", message.len());
    Effect::SendMessage(OutboundMessage {
        request_id,
        message,
    })
}

fn settle(app: &mut App, request_id: u64, outcome: Result<String, TransportError>) {
    if app.in_flight != Some(request_id) {
        warn!(
            "Discarding settlement for request {request_id} (outstanding: {:?})",
            app.in_flight
        );
        return;
    }
    app.in_flight = None;

    match outcome {
        Ok(reply) => {
            info!("Request {request_id} settled with reply ({} bytes)", reply.len());
            app.log.push_bot(reply);
            app.last_error = None;
        }
        Err(e) => {
            error!("Request {request_id} failed: {e}");
            app.last_error = Some(user_facing_error(&e).to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat::Sender;
    use crate::test_support::test_app;
    use crate::transport::FALLBACK_REPLY;

    fn type_text(app: &mut App, text: &str) {
        update(app, Action::Edit(InputEdit::Paste(text.to_string())));
    }

    fn submit_text(app: &mut App, text: &str) -> Effect {
        type_text(app, text);
        update(app, Action::Submit)
    }

    fn sent(effect: Effect) -> OutboundMessage {
        match effect {
            Effect::SendMessage(outbound) => outbound,
            other => panic!("Expected SendMessage, got {other:?}"),
        }
    }

    #[test]
    fn test_submit_appends_user_turn_and_requests_one_call() {
        let mut app = test_app();
        let outbound = sent(submit_text(&mut app, "  hello bot  "));

        assert_eq!(outbound.message, "hello bot");
        assert_eq!(app.log.len(), 1);
        let turn = app.log.last().unwrap();
        assert_eq!(turn.sender, Sender::User);
        assert_eq!(turn.content, "hello bot");
        assert!(app.input.is_empty());
        assert!(app.is_pending());
    }

    #[test]
    fn test_whitespace_submit_is_noop() {
        let mut app = test_app();
        let effect = submit_text(&mut app, " \n\t ");

        assert_eq!(effect, Effect::None);
        assert!(app.log.is_empty());
        assert!(!app.is_pending());
        assert!(app.last_error.is_none());
    }

    #[test]
    fn test_empty_submit_does_not_clear_previous_error() {
        let mut app = test_app();
        app.last_error = Some(GENERIC_ERROR_MESSAGE.to_string());
        assert_eq!(update(&mut app, Action::Submit), Effect::None);
        assert_eq!(app.last_error.as_deref(), Some(GENERIC_ERROR_MESSAGE));
    }

    #[test]
    fn test_second_submit_while_pending_is_noop() {
        let mut app = test_app();
        sent(submit_text(&mut app, "first"));

        // Edits are rejected while pending, so force text into the buffer
        app.input.insert_str("second");
        let effect = update(&mut app, Action::Submit);

        assert_eq!(effect, Effect::None);
        assert_eq!(app.log.len(), 1);
        assert_eq!(app.input.as_str(), "second");
    }

    #[test]
    fn test_edits_ignored_while_pending() {
        let mut app = test_app();
        sent(submit_text(&mut app, "first"));
        type_text(&mut app, "typed while waiting");
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_success_appends_bot_turn_and_clears_pending() {
        let mut app = test_app();
        let outbound = sent(submit_text(&mut app, "hi"));

        update(
            &mut app,
            Action::ReplySettled {
                request_id: outbound.request_id,
                outcome: Ok("Hi there".to_string()),
            },
        );

        assert!(!app.is_pending());
        assert!(app.last_error.is_none());
        assert_eq!(app.log.len(), 2);
        let reply = app.log.last().unwrap();
        assert_eq!(reply.sender, Sender::Bot);
        assert_eq!(reply.content, "Hi there");
    }

    #[test]
    fn test_connectivity_failure_sets_connection_message() {
        let mut app = test_app();
        let outbound = sent(submit_text(&mut app, "hi"));

        update(
            &mut app,
            Action::ReplySettled {
                request_id: outbound.request_id,
                outcome: Err(TransportError::Network("connection refused".into())),
            },
        );

        assert!(!app.is_pending());
        assert_eq!(app.last_error.as_deref(), Some(CONNECTION_ERROR_MESSAGE));
        assert_eq!(app.log.len(), 1, "no bot turn on failure");
    }

    #[test]
    fn test_status_failure_sets_generic_message() {
        let mut app = test_app();
        let outbound = sent(submit_text(&mut app, "hi"));

        update(
            &mut app,
            Action::ReplySettled {
                request_id: outbound.request_id,
                outcome: Err(TransportError::Status {
                    status: 500,
                    body: "boom".into(),
                }),
            },
        );

        assert!(!app.is_pending());
        assert_eq!(app.last_error.as_deref(), Some(GENERIC_ERROR_MESSAGE));
        assert_eq!(app.log.len(), 1);
        assert!(!app.log.last().unwrap().content.contains("boom"));
    }

    #[test]
    fn test_new_submission_clears_last_error() {
        let mut app = test_app();
        let outbound = sent(submit_text(&mut app, "one"));
        update(
            &mut app,
            Action::ReplySettled {
                request_id: outbound.request_id,
                outcome: Err(TransportError::Parse("eof".into())),
            },
        );
        assert!(app.last_error.is_some());

        sent(submit_text(&mut app, "two"));
        assert!(app.last_error.is_none());
        assert_eq!(app.log.len(), 2, "failed turn is not rolled back");
    }

    #[test]
    fn test_stale_settlement_is_discarded() {
        let mut app = test_app();
        let outbound = sent(submit_text(&mut app, "hi"));

        update(
            &mut app,
            Action::ReplySettled {
                request_id: outbound.request_id + 7,
                outcome: Ok("from nowhere".to_string()),
            },
        );

        assert!(app.is_pending());
        assert_eq!(app.log.len(), 1);
    }

    #[test]
    fn test_settlement_while_idle_is_discarded() {
        let mut app = test_app();
        update(
            &mut app,
            Action::ReplySettled {
                request_id: 1,
                outcome: Ok(FALLBACK_REPLY.to_string()),
            },
        );
        assert!(app.log.is_empty());
        assert!(!app.is_pending());
    }

    #[test]
    fn test_request_ids_are_unique_per_submission() {
        let mut app = test_app();
        let first = sent(submit_text(&mut app, "a"));
        update(
            &mut app,
            Action::ReplySettled {
                request_id: first.request_id,
                outcome: Ok("b".into()),
            },
        );
        let second = sent(submit_text(&mut app, "c"));
        assert_ne!(first.request_id, second.request_id);
    }

    #[test]
    fn test_log_order_across_cycles() {
        let mut app = test_app();
        for round in 0..3 {
            let outbound = sent(submit_text(&mut app, &format!("q{round}")));
            update(
                &mut app,
                Action::ReplySettled {
                    request_id: outbound.request_id,
                    outcome: Ok(format!("a{round}")),
                },
            );
        }

        let contents: Vec<&str> = app.log.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["q0", "a0", "q1", "a1", "q2", "a2"]);
        let senders: Vec<Sender> = app.log.iter().map(|t| t.sender).collect();
        assert_eq!(
            senders,
            vec![Sender::User, Sender::Bot, Sender::User, Sender::Bot, Sender::User, Sender::Bot]
        );
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
