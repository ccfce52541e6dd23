//! Maps [`ChatError`] onto HTTP status codes and the `{error, code}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chat_core::ChatError;
use serde::Serialize;
use storage::StorageError;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

/// Handler error: 400 for validation, 404 for missing entities, 500 otherwise.
#[derive(Debug)]
pub struct ApiError(pub ChatError);

impl ApiError {
    pub fn not_found(what: impl Into<String>) -> Self {
        ApiError(ChatError::NotFound(what.into()))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError(ChatError::Validation(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        match self.0 {
            ChatError::Validation(_) => StatusCode::BAD_REQUEST,
            ChatError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        ApiError(e)
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        let body = ErrorResponse {
            error: self.0.to_string(),
            code: self.0.code(),
        };
        (status, Json(body)).into_response()
    }
}
