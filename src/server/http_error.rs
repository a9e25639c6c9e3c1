//! JSON error bodies for the HTTP surface.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::NotesError;

pub const NOTE_NOT_FOUND: &str = "NOTE_NOT_FOUND";
pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const STORAGE_UNAVAILABLE: &str = "STORAGE_UNAVAILABLE";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

#[derive(Debug, Serialize, Deserialize)]
pub struct HttpError {
    /// User-facing error message
    pub message: String,
    /// Machine-readable error code
    pub code: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.code.as_str() {
            NOTE_NOT_FOUND => StatusCode::NOT_FOUND,
            INVALID_INPUT => StatusCode::BAD_REQUEST,
            STORAGE_UNAVAILABLE => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<NotesError> for HttpError {
    fn from(err: NotesError) -> Self {
        let code = match &err {
            NotesError::NotFound(_) => NOTE_NOT_FOUND,
            NotesError::InvalidInput(_) => INVALID_INPUT,
            NotesError::StorageUnavailable { .. } => {
                tracing::error!(error = %err, "storage unavailable");
                STORAGE_UNAVAILABLE
            }
            _ => {
                tracing::error!(error = %err, "request failed");
                INTERNAL_ERROR
            }
        };
        HttpError::new(err.to_string(), code)
    }
}

/// Unreadable request bodies (bad JSON, wrong field types, a malformed date,
/// a missing content type) are all invalid input.
impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "rejected request body");
        HttpError::new(rejection.body_text(), INVALID_INPUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (NotesError::NotFound("x".to_string()), StatusCode::NOT_FOUND),
            (NotesError::InvalidInput("x".to_string()), StatusCode::BAD_REQUEST),
            (
                NotesError::StorageUnavailable {
                    path: "notes.json".into(),
                    reason: "bad".to_string(),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                NotesError::Io(std::io::Error::other("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(HttpError::from(err).status(), status);
        }
    }

    #[test]
    fn test_message_carries_id() {
        let err = HttpError::from(NotesError::NotFound("abc".to_string()));
        assert_eq!(err.code, NOTE_NOT_FOUND);
        assert!(err.message.contains("abc"));
    }
}
