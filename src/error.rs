//! Error type for reply generation and form actions.

use reqwest::StatusCode;

pub(crate) const VALIDATION_MESSAGE: &str = "Please enter email content";
pub(crate) const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";
pub(crate) const SERVER_MESSAGE: &str = "Server error. Please try again later.";
pub(crate) const RATE_LIMIT_MESSAGE: &str =
    "Too many requests. Please wait a moment and try again.";
pub(crate) const GENERIC_MESSAGE: &str = "Failed to generate reply. Please try again.";
pub(crate) const CLIPBOARD_MESSAGE: &str = "Failed to copy to clipboard";

/// Errors produced by the client and the form controller.
///
/// Every variant is recoverable: the controller stays usable after any of them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The email content was empty or whitespace only. No request was sent.
    #[error("Please enter email content")]
    EmptyContent,

    /// A submission was attempted while another request is still pending.
    #[error("a reply request is already in flight")]
    RequestInFlight,

    /// The request did not complete within the configured timeout.
    #[error("Request timed out. Please try again.")]
    Timeout,

    /// The service answered with HTTP 500.
    #[error("Server error. Please try again later. (HTTP {status})")]
    Server { status: u16 },

    /// The service answered with HTTP 429.
    #[error("Too many requests. Please wait a moment and try again.")]
    RateLimited,

    /// Any other non-2xx answer (other 5xx included), optionally carrying a
    /// server-supplied message.
    #[error("request rejected with HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Request {
        status: u16,
        message: Option<String>,
    },

    /// The request task was aborted before it finished.
    #[error("request was cancelled")]
    Cancelled,

    /// Transport failure (connection refused, DNS, malformed response, ...).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform clipboard refused the write.
    #[error("Failed to copy to clipboard: {0}")]
    Clipboard(String),

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Text suitable for a notification or inline error banner.
    ///
    /// Precedence is timeout, server error, rate limit, server-supplied
    /// message, then the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            Error::EmptyContent => VALIDATION_MESSAGE.to_string(),
            Error::Timeout => TIMEOUT_MESSAGE.to_string(),
            Error::Server { .. } => SERVER_MESSAGE.to_string(),
            Error::RateLimited => RATE_LIMIT_MESSAGE.to_string(),
            Error::Request {
                message: Some(message),
                ..
            } => message.clone(),
            Error::Request { message: None, .. } | Error::Http(_) | Error::Cancelled => {
                GENERIC_MESSAGE.to_string()
            }
            Error::Clipboard(_) => CLIPBOARD_MESSAGE.to_string(),
            Error::RequestInFlight | Error::Config(_) => self.to_string(),
        }
    }

    /// Whether this error came from the network call, as opposed to local
    /// validation or clipboard access.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Error::Timeout
                | Error::Server { .. }
                | Error::RateLimited
                | Error::Request { .. }
                | Error::Http(_)
                | Error::Cancelled
        )
    }
}

/// Raw outcome of a failed HTTP exchange before classification.
#[derive(Debug)]
pub(crate) enum Failure {
    Transport(reqwest::Error),
    Status {
        status: StatusCode,
        message: Option<String>,
    },
}

impl From<Failure> for Error {
    fn from(failure: Failure) -> Self {
        match failure {
            Failure::Transport(err) if err.is_timeout() => Error::Timeout,
            Failure::Transport(err) => Error::Http(err),
            Failure::Status { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR => {
                Error::Server {
                    status: status.as_u16(),
                }
            }
            Failure::Status { status, .. } if status == StatusCode::TOO_MANY_REQUESTS => {
                Error::RateLimited
            }
            Failure::Status { status, message } => Error::Request {
                status: status.as_u16(),
                message,
            },
        }
    }
}

/// Pull a user-facing `message` field out of an error response body.
///
/// Empty strings, `null`, `false` and zero count as absent; any other
/// non-string value is rendered as JSON text.
pub(crate) fn server_message(body: &str) -> Option<String> {
    use serde_json::Value;

    let value = serde_json::from_str::<Value>(body).ok()?.get("message")?.clone();
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16, message: Option<&str>) -> Error {
        Failure::Status {
            status: StatusCode::from_u16(code).unwrap(),
            message: message.map(str::to_string),
        }
        .into()
    }

    #[test]
    fn server_error_wins_over_body_message() {
        let err = status(500, Some("model exploded"));
        assert!(matches!(err, Error::Server { status: 500 }));
        assert_eq!(err.user_message(), SERVER_MESSAGE);
    }

    #[test]
    fn other_5xx_prefer_server_message() {
        let err = status(503, Some("Down for maintenance"));
        assert!(matches!(err, Error::Request { status: 503, .. }));
        assert_eq!(err.user_message(), "Down for maintenance");
    }

    #[test]
    fn other_5xx_without_message_use_fallback() {
        let err = status(502, None);
        assert!(matches!(
            err,
            Error::Request {
                status: 502,
                message: None
            }
        ));
        assert_eq!(err.user_message(), GENERIC_MESSAGE);
    }

    #[test]
    fn rate_limit_wins_over_body_message() {
        let err = status(429, Some("slow down"));
        assert!(matches!(err, Error::RateLimited));
        assert_eq!(err.user_message(), RATE_LIMIT_MESSAGE);
    }

    #[test]
    fn server_message_used_for_other_statuses() {
        let err = status(400, Some("Email content too long"));
        assert_eq!(err.user_message(), "Email content too long");
    }

    #[test]
    fn generic_fallback_without_message() {
        let err = status(404, None);
        assert!(matches!(
            err,
            Error::Request {
                status: 404,
                message: None
            }
        ));
        assert_eq!(err.user_message(), GENERIC_MESSAGE);
    }

    #[test]
    fn extracts_message_field() {
        assert_eq!(
            server_message(r#"{"message":"bad tone"}"#).as_deref(),
            Some("bad tone")
        );
        assert_eq!(server_message(r#"{"message":""}"#), None);
        assert_eq!(server_message("plain text"), None);
        assert_eq!(server_message(r#"{"error":"x"}"#), None);
    }

    #[test]
    fn non_string_messages_are_rendered() {
        assert_eq!(server_message(r#"{"message":42}"#).as_deref(), Some("42"));
        assert_eq!(server_message(r#"{"message":true}"#).as_deref(), Some("true"));
        assert_eq!(
            server_message(r#"{"message":["a","b"]}"#).as_deref(),
            Some(r#"["a","b"]"#)
        );
        assert_eq!(server_message(r#"{"message":0}"#), None);
        assert_eq!(server_message(r#"{"message":false}"#), None);
        assert_eq!(server_message(r#"{"message":null}"#), None);
    }

    #[test]
    fn local_errors_are_not_request_errors() {
        assert!(!Error::EmptyContent.is_request_error());
        assert!(!Error::Clipboard("denied".into()).is_request_error());
        assert!(Error::Timeout.is_request_error());
        assert!(Error::RateLimited.is_request_error());
    }
}
