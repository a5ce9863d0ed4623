//! Application error type shared by every handler.
//!
//! Every error is rendered as `{ "success": false, "message": ... }` with the
//! carried status code. Server-side failures are logged and replaced by a
//! generic message so store or driver details never reach the client.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::FORBIDDEN, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    /// The message a client sees for this error.
    pub fn public_message(&self) -> String {
        if self.status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        }

        let body = Json(json!({
            "success": false,
            "message": self.public_message(),
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_client_error_keeps_message() {
        let err = AppError::bad_request(anyhow!("Plan name is required"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Plan name is required");
    }

    #[test]
    fn test_server_error_hides_details() {
        let err = AppError::internal(anyhow!("connection refused on 10.0.0.4:5432"));
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_from_foreign_error_is_internal() {
        let io = std::io::Error::other("disk full");
        let err: AppError = io.into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::conflict(anyhow!("duplicate")).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
