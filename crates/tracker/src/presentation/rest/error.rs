use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::dto::{LOGGING_FAILED_BODY, NOT_FOUND_BODY};

/// API error rendered as a plain-text body
///
/// Bodies stay generic; the underlying cause is logged where it happens.
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status: StatusCode,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn transaction_not_found() -> Self {
        ApiError {
            message: NOT_FOUND_BODY.to_string(),
            status: StatusCode::NOT_FOUND,
        }
    }

    pub fn logging_failed() -> Self {
        ApiError {
            message: LOGGING_FAILED_BODY.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "API Error {}: {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}
