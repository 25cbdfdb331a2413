//! API error responses.
//!
//! Every failure leaving a handler renders as `{ "error": "<message>" }` with
//! the mapped status, which is the shape the sign-in/sign-up forms parse and
//! surface inline. Client errors are logged where they are rendered so the
//! handlers stay quiet.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use payloads::ErrorBody;

/// An error response: HTTP status plus the message carried in the body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// 500 with a fixed public message; the cause goes to the log only.
    #[must_use]
    pub fn internal(err: impl std::fmt::Display) -> Self {
        tracing::error!(error = %err, "internal server error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            tracing::warn!(status = %self.status, error = %self.message, "request rejected");
        }
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
