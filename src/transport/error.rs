use std::fmt;

/// Errors that can occur while exchanging a message with the webhook.
///
/// Only [`is_connectivity`](TransportError::is_connectivity) matters to the
/// chat UI; the detail is for the log file.
#[derive(Debug)]
pub enum TransportError {
    /// The request never got an HTTP response (DNS, refused, reset, timeout).
    Network(String),
    /// The endpoint answered with a non-success status.
    Status { status: u16, body: String },
    /// The response body was not valid JSON.
    Parse(String),
}

impl TransportError {
    /// True when the endpoint could not be reached at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, TransportError::Network(_))
    }
}

/// Undecodable response bodies are `Parse`; everything else reqwest reports
/// (connect, timeout, body read) counts as `Network`.
impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            TransportError::Parse(e.to_string())
        } else {
            TransportError::Network(e.to_string())
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network(msg) => write!(f, "network error: {msg}"),
            TransportError::Status { status, body } => {
                write!(f, "webhook error (HTTP {status}): {body}")
            }
            TransportError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_network_is_connectivity() {
        assert!(TransportError::Network("refused".into()).is_connectivity());
        assert!(
            !TransportError::Status {
                status: 500,
                body: String::new()
            }
            .is_connectivity()
        );
        assert!(!TransportError::Parse("eof".into()).is_connectivity());
    }

    #[test]
    fn test_display_includes_status() {
        let err = TransportError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "webhook error (HTTP 502): bad gateway");
    }
}
