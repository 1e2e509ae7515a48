use serde::de::IgnoredAny;
use thiserror::Error;

use crate::envelope::ApiEnvelope;

/// Shown whenever the backend gives no usable message
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Failure of a call to the club backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Rejected locally before any request was sent
    #[error("{0}")]
    Validation(String),

    /// Non-2xx response, or a 2xx envelope whose success flag is false.
    /// `message` is `None` when the body carried no usable text.
    #[error("{}", .message.as_deref().unwrap_or(FALLBACK_MESSAGE))]
    Server { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Your session has expired. Please sign in again.")]
    Unauthorized,
}

impl ApiError {
    /// Build the error for a non-2xx response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }

        let message = serde_json::from_str::<ApiEnvelope<IgnoredAny>>(body)
            .ok()
            .and_then(|envelope| envelope.message().map(str::to_string))
            .filter(|message| !message.trim().is_empty());

        ApiError::Server { status, message }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Text for inline error banners
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            ApiError::Network(_) | ApiError::Decode(_) => FALLBACK_MESSAGE.to_string(),
            ApiError::Server { .. } | ApiError::Unauthorized => self.to_string(),
        }
    }

    /// Like [`ApiError::user_message`] but with a caller-specific fallback for
    /// failures that carry no server message.
    pub fn user_message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Network(_)
            | ApiError::Decode(_)
            | ApiError::Server { message: None, .. } => fallback.to_string(),
            _ => self.user_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_status_wins_over_body() {
        let error = ApiError::from_response(401, r#"{"isSuccess":false,"message":"expired"}"#);
        assert!(error.is_unauthorized());
    }

    #[test]
    fn test_server_message_is_used_verbatim() {
        let error = ApiError::from_response(400, r#"{"success":false,"message":"Invalid code"}"#);
        assert_eq!(
            error,
            ApiError::Server {
                status: 400,
                message: Some("Invalid code".to_string())
            }
        );
        assert_eq!(error.user_message(), "Invalid code");
    }

    #[test]
    fn test_fallback_when_body_has_no_message() {
        for body in ["", "<html>Bad Gateway</html>", r#"{"isSuccess":false}"#, r#"{"message":"  "}"#] {
            let error = ApiError::from_response(502, body);
            assert_eq!(error.user_message(), FALLBACK_MESSAGE);
        }
    }

    #[test]
    fn test_transport_errors_use_caller_fallback() {
        let error = ApiError::Network("connection refused".to_string());
        assert_eq!(error.user_message(), FALLBACK_MESSAGE);
        assert_eq!(error.user_message_or("Check-in failed"), "Check-in failed");

        let error = ApiError::Validation("Enter all 6 digits".to_string());
        assert_eq!(error.user_message_or("Check-in failed"), "Enter all 6 digits");
    }

    #[test]
    fn test_http_error_without_message_uses_caller_fallback() {
        let error = ApiError::from_response(500, "");
        assert_eq!(error, ApiError::Server { status: 500, message: None });
        assert_eq!(error.user_message(), FALLBACK_MESSAGE);
        assert_eq!(error.user_message_or("Check-in failed"), "Check-in failed");

        let error = ApiError::from_response(409, r#"{"isSuccess":false,"message":"Code already used"}"#);
        assert_eq!(error.user_message_or("Check-in failed"), "Code already used");
    }
}
