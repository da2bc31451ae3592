//! Error types for the admin API client.
//!
//! Every failure propagates to the caller; nothing is swallowed. The only
//! locally-handled case is the single 401 → refresh → retry sequence in
//! [`crate::ApiClient`], and even that surfaces its terminal outcome here
//! (either the retried response or [`ApiError::SessionExpired`]).

use serde::Deserialize;
use thiserror::Error;

pub use crate::session::storage::StorageError;

/// Fallback for error responses without a usable message body.
pub const GENERIC_ERROR_MESSAGE: &str = "Request failed";

/// Convenient result alias for client operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur when talking to the admin backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure (DNS, connect, TLS, timed-out body read).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend replied with a non-2xx status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Server-supplied message, or [`GENERIC_ERROR_MESSAGE`].
        message: String,
    },

    /// A response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Durable session storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The session could not be refreshed; the client has logged out.
    ///
    /// Carries the refresh call's own failure as its source.
    #[error("Session expired, please log in again")]
    SessionExpired(#[source] Box<ApiError>),
}

impl ApiError {
    /// HTTP status of the failure, when one exists.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            Self::SessionExpired(source) => source.status(),
            Self::Parse(_) | Self::Storage(_) => None,
        }
    }

    /// User-facing message for this failure.
    ///
    /// Prefers the server-supplied message and falls back to
    /// [`GENERIC_ERROR_MESSAGE`] elsewhere, mirroring what the dashboard
    /// shows in its notifications.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::SessionExpired(_) => "Session expired, please log in again".to_owned(),
            Self::Transport(_) | Self::Parse(_) | Self::Storage(_) => {
                GENERIC_ERROR_MESSAGE.to_owned()
            }
        }
    }
}

/// Error body shape used by the backend: `{"message": "..."}` where the
/// message is a single string or an array of validation strings.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: ErrorMessage,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

/// Consume a non-2xx response into an [`ApiError::Api`].
pub(crate) async fn from_response(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    api_error(status, &body)
}

/// Build an [`ApiError::Api`] from a response status and raw body text.
///
/// Tries the `{message}` shape first; non-JSON bodies are used verbatim and
/// an empty body falls back to [`GENERIC_ERROR_MESSAGE`].
pub(crate) fn api_error(status: u16, body: &str) -> ApiError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => match parsed.message {
            ErrorMessage::One(message) => message,
            ErrorMessage::Many(messages) => messages.join("; "),
        },
        Err(_) if body.trim().is_empty() => GENERIC_ERROR_MESSAGE.to_owned(),
        Err(_) => body.trim().to_owned(),
    };

    ApiError::Api { status, message }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_message_body() {
        let err = api_error(400, r#"{"message":"Invalid voucher code"}"#);
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid voucher code");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn joins_validation_message_arrays() {
        let err = api_error(
            422,
            r#"{"message":["username must be longer","email must be an email"]}"#,
        );
        assert_eq!(
            err.message(),
            "username must be longer; email must be an email"
        );
    }

    #[test]
    fn falls_back_to_raw_body_when_not_message_shaped() {
        let err = api_error(502, "Bad Gateway");
        assert_eq!(err.message(), "Bad Gateway");
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn empty_body_uses_generic_message() {
        let err = api_error(500, "");
        assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn session_expired_reports_underlying_status() {
        let refresh_failure = api_error(401, r#"{"message":"Refresh token expired"}"#);
        let err = ApiError::SessionExpired(Box::new(refresh_failure));
        assert_eq!(err.status(), Some(401));
    }
}
