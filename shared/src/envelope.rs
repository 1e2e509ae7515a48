use serde::Deserialize;

use crate::error::ApiError;

/// Response wrapper used by every backend endpoint.
///
/// Older endpoints report success as `success`, newer ones as `isSuccess`.
/// Both are accepted here so nothing past the API client has to care.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(rename = "isSuccess")]
    is_success: Option<bool>,
    success: Option<bool>,
    message: Option<String>,
    result: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn succeeded(&self) -> bool {
        self.is_success.or(self.success).unwrap_or(false)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Unwrap the payload of a successful envelope.
    pub fn into_result(self, status: u16) -> Result<T, ApiError> {
        if !self.succeeded() {
            return Err(self.into_failure(status));
        }
        self.result
            .ok_or_else(|| ApiError::Decode("response carried no result".to_string()))
    }

    /// For endpoints whose only payload is the success flag.
    pub fn into_ack(self, status: u16) -> Result<(), ApiError> {
        if self.succeeded() {
            Ok(())
        } else {
            Err(self.into_failure(status))
        }
    }

    fn into_failure(self, status: u16) -> ApiError {
        let message = self.message.filter(|message| !message.trim().is_empty());
        ApiError::Server { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FALLBACK_MESSAGE;
    use crate::GeneratedCode;
    use serde::de::IgnoredAny;

    #[test]
    fn test_accepts_either_success_key() {
        let legacy: ApiEnvelope<bool> =
            serde_json::from_str(r#"{"success":true,"result":true}"#).unwrap();
        let current: ApiEnvelope<bool> =
            serde_json::from_str(r#"{"isSuccess":true,"result":true}"#).unwrap();

        assert!(legacy.succeeded());
        assert!(current.succeeded());
    }

    #[test]
    fn test_missing_flag_is_failure() {
        let envelope: ApiEnvelope<IgnoredAny> =
            serde_json::from_str(r#"{"message":"nope"}"#).unwrap();
        assert!(!envelope.succeeded());
        assert_eq!(
            envelope.into_ack(200),
            Err(ApiError::Server {
                status: 200,
                message: Some("nope".to_string())
            })
        );
    }

    #[test]
    fn test_into_result_unwraps_payload() {
        let envelope: ApiEnvelope<GeneratedCode> = serde_json::from_str(
            r#"{"isSuccess":true,"message":"ok","result":{"code":"123456","expiresIn":60}}"#,
        )
        .unwrap();

        let code = envelope.into_result(200).unwrap();
        assert_eq!(code.code, "123456");
        assert_eq!(code.expires_in, 60);
    }

    #[test]
    fn test_success_without_result_is_decode_error() {
        let envelope: ApiEnvelope<GeneratedCode> =
            serde_json::from_str(r#"{"isSuccess":true}"#).unwrap();
        assert!(matches!(envelope.into_result(200), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_failed_envelope_uses_fallback_message() {
        let envelope: ApiEnvelope<bool> =
            serde_json::from_str(r#"{"isSuccess":false,"result":false}"#).unwrap();
        let error = envelope.into_ack(200).unwrap_err();
        assert_eq!(error, ApiError::Server { status: 200, message: None });
        assert_eq!(error.user_message(), FALLBACK_MESSAGE);
    }
}
