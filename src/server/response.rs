use crate::domain::NoteError;
use crate::payload::PayloadError;
use axum::Json;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Everything a handler can fail with, mapped onto a status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Note(#[from] NoteError),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error("invalid form body: {0}")]
    Form(#[from] FormRejection),

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Note(NoteError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Note(NoteError::AlreadyExists(_))
            | ApiError::Note(NoteError::InvalidName(_))
            | ApiError::Note(NoteError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Note(NoteError::FileError(_)) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Payload(PayloadError::UnsupportedMediaType(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            ApiError::Payload(PayloadError::Malformed(_))
            | ApiError::Form(_)
            | ApiError::MissingField(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            log::error!("request failed: {self}");
            "internal server error".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
