//! Unified client error model.
//! Every facade call resolves to either the parsed payload or one of these variants;
//! network and decode failures are carried unchanged, HTTP failures are normalized into `ApiError`.

use std::fmt::{Display, Formatter};

/// Fallback message when a failed response carries no `error` field.
pub const GENERIC_FAILURE: &str = "API request failed";
/// Fallback message for the document upload path.
pub const UPLOAD_FAILURE: &str = "Upload failed";
/// Fallback message for the document preview path.
pub const PREVIEW_FAILURE: &str = "Preview failed";

/// Normalized HTTP-level failure: the backend's `error` message or a fixed fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    pub fn new<S: Into<String>>(status: u16, message: S) -> Self {
        Self { status, message: message.into() }
    }

    /// Build from a decoded failure body. Only a string `error` field is taken as the message.
    pub fn from_body(status: u16, body: &serde_json::Value, fallback: &str) -> Self {
        let message = body
            .get("error")
            .and_then(|e| e.as_str())
            .unwrap_or(fallback);
        Self::new(status, message)
    }

    pub fn is_unauthorized(&self) -> bool { self.status == 401 }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Non-success status, normalized.
    #[error("{0}")]
    Api(ApiError),
    /// Connection could not be established or the transfer failed.
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    /// Response body was not valid JSON (or did not match the expected shape).
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
    /// Reading an upload file from disk failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Session storage could not be written.
    #[error("session storage: {0}")]
    Storage(#[from] crate::session::StorageError),
}

impl ClientError {
    pub fn code_str(&self) -> &'static str {
        match self {
            ClientError::Api(_) => "api_error",
            ClientError::Network(_) => "network_error",
            ClientError::Decode(_) => "decode_error",
            ClientError::Io(_) => "io_error",
            ClientError::Storage(_) => "storage_error",
        }
    }

    /// Message suitable for a toast; for `Api` this is exactly the backend message.
    pub fn message(&self) -> String {
        match self {
            ClientError::Api(e) => e.message.clone(),
            other => other.to_string(),
        }
    }

    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ApiError> for ClientError {
    fn from(err: ApiError) -> Self { ClientError::Api(err) }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_error_takes_backend_message() {
        let e = ApiError::from_body(400, &json!({"error": "Invalid CAPTCHA. Please try again."}), GENERIC_FAILURE);
        assert_eq!(e.message, "Invalid CAPTCHA. Please try again.");
        assert_eq!(e.status, 400);
    }

    #[test]
    fn api_error_falls_back_without_error_field() {
        let e = ApiError::from_body(500, &json!({"detail": "boom"}), GENERIC_FAILURE);
        assert_eq!(e.message, "API request failed");
        let e = ApiError::from_body(500, &json!({"error": 42}), UPLOAD_FAILURE);
        assert_eq!(e.message, "Upload failed");
        let e = ApiError::from_body(404, &json!([1, 2]), PREVIEW_FAILURE);
        assert_eq!(e.message, "Preview failed");
    }

    #[test]
    fn client_error_codes_and_messages() {
        let api: ClientError = ApiError::new(401, "Not authenticated").into();
        assert_eq!(api.code_str(), "api_error");
        assert_eq!(api.message(), "Not authenticated");
        assert_eq!(api.to_string(), "Not authenticated");
        assert!(api.as_api().map(|e| e.is_unauthorized()).unwrap_or(false));

        let decode: ClientError = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err().into();
        assert_eq!(decode.code_str(), "decode_error");
        assert!(decode.as_api().is_none());

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let storage: ClientError = crate::session::StorageError::from(io).into();
        assert_eq!(storage.code_str(), "storage_error");
        assert_eq!(storage.to_string(), "session storage: storage io: disk full");
    }
}
