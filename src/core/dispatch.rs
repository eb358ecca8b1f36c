//! Performs a `SendMessage` effect: one transport call, resolved into the
//! `ReplySettled` action that brings the lifecycle back to idle.

use log::debug;

use crate::core::action::{Action, OutboundMessage};
use crate::transport::ReplyTransport;

/// Runs the transport call for `outbound`. Always yields exactly one action,
/// success or failure, carrying the request id it was issued with.
pub async fn deliver(transport: &dyn ReplyTransport, outbound: OutboundMessage) -> Action {
    let OutboundMessage {
        request_id,
        message,
    } = outbound;
    debug!("Delivering request {request_id} via {}", transport.name());
    let outcome = transport.send(&message).await;
    Action::ReplySettled {
        request_id,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingTransport, RecordingTransport};

    #[tokio::test]
    async fn test_deliver_success_carries_request_id() {
        let transport = RecordingTransport::replying("pong");
        let action = deliver(
            &transport,
            OutboundMessage {
                request_id: 9,
                message: "ping".to_string(),
            },
        )
        .await;

        match action {
            Action::ReplySettled {
                request_id,
                outcome,
            } => {
                assert_eq!(request_id, 9);
                assert_eq!(outcome.unwrap(), "pong");
            }
            other => panic!("Expected ReplySettled, got {other:?}"),
        }
        assert_eq!(transport.sent(), vec!["ping".to_string()]);
    }

    #[tokio::test]
    async fn test_deliver_failure_still_settles() {
        let action = deliver(
            &FailingTransport::network(),
            OutboundMessage {
                request_id: 3,
                message: "ping".to_string(),
            },
        )
        .await;

        assert!(matches!(
            action,
            Action::ReplySettled { request_id: 3, outcome: Err(ref e) } if e.is_connectivity()
        ));
    }
}
