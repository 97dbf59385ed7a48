//! Errors returned by the back-office API client

use serde::Deserialize;
use thiserror::Error;

/// Shape of a failed response body
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be read
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a server error from a status and raw response body.
    ///
    /// The `error` string of a JSON body is kept; anything else is dropped.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty());
        ApiError::Server { status, message }
    }

    /// Message to show the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Server {
                status,
                message: None,
            } => format!("Request failed with status code {status}"),
            ApiError::Transport(err) => err.to_string(),
            ApiError::Decode(detail) => format!("Unexpected response from server: {detail}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_surfaced() {
        let err = ApiError::from_response(409, r#"{"error":"duplicate PAN"}"#);
        assert_eq!(err.user_message(), "duplicate PAN");
    }

    #[test]
    fn test_missing_message_falls_back() {
        let err = ApiError::from_response(500, "<html>oops</html>");
        assert!(matches!(
            err,
            ApiError::Server {
                status: 500,
                message: None
            }
        ));
        assert_eq!(err.user_message(), "Request failed with status code 500");
    }

    #[test]
    fn test_blank_message_falls_back() {
        let err = ApiError::from_response(400, r#"{"error":"  "}"#);
        assert_eq!(err.user_message(), "Request failed with status code 400");
    }

    #[test]
    fn test_error_field_absent() {
        let err = ApiError::from_response(422, r#"{"message":"bad"}"#);
        assert_eq!(err.user_message(), "Request failed with status code 422");
    }

    #[test]
    fn test_display() {
        let err = ApiError::from_response(409, r#"{"error":"duplicate PAN"}"#);
        assert_eq!(err.to_string(), "server returned 409: duplicate PAN");
    }
}
