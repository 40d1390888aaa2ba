/*
[INPUT]:  Error sources (HTTP transport, engine API, serialization, config)
[OUTPUT]: Structured error types with remote-message context
[POS]:    Error handling layer - unified error type for the adapter
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the Flowdesk adapter
#[derive(Error, Debug)]
pub enum FlowdeskError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Engine returned an error response; message is the remote message
    /// when one was present, otherwise the status line
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FlowdeskError {
    /// Create an API error from a status code and remote message.
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        FlowdeskError::Api {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    /// Whether the error came back from the engine rather than the
    /// transport or the local machinery.
    pub fn is_remote(&self) -> bool {
        matches!(self, FlowdeskError::Api { .. })
    }

    /// The message an operator should see for this error.
    pub fn user_message(&self) -> String {
        match self {
            FlowdeskError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, FlowdeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = FlowdeskError::api_error(StatusCode::CONFLICT, "task already closed");
        match err {
            FlowdeskError::Api { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "task already closed");
            }
            _ => panic!("Expected Api error variant"),
        }
    }

    #[test]
    fn test_user_message_prefers_remote_text() {
        let err = FlowdeskError::api_error(StatusCode::BAD_REQUEST, "missing outputs");
        assert!(err.is_remote());
        assert_eq!(err.user_message(), "missing outputs");

        let err = FlowdeskError::InvalidResponse("empty body".to_string());
        assert!(!err.is_remote());
        assert_eq!(err.user_message(), "Invalid response: empty body");
    }
}
