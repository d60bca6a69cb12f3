//! API error type and the JSON error body.
//!
//! Every handler returns `Result<_, ApiError>`; the domain error code picks
//! the HTTP status.

use std::collections::HashMap;
use std::str::FromStr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// JSON body for every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, String>>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// Converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn bad_request(field: &str, message: impl Into<String>) -> Self {
        Self(DomainError::validation(field, message))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self(DomainError::new(ErrorCode::Forbidden, message))
    }

    /// Parses a path/query/body identifier, reporting a bad value as 400.
    pub fn parse_id<T: FromStr>(field: &str, raw: &str) -> Result<T, Self> {
        raw.trim()
            .parse()
            .map_err(|_| Self::bad_request(field, format!("'{}' is not a valid id", raw)))
    }

    pub fn status(&self) -> StatusCode {
        match self.0.code {
            ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::AIProviderError
            | ErrorCode::StorageError
            | ErrorCode::EmailError
            | ErrorCode::DatabaseError
            | ErrorCode::CacheError
            | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = %self.0.code, message = %self.0.message, "request failed");
        }
        let DomainError {
            code,
            message,
            details,
        } = self.0;
        let body = ErrorResponse {
            code: code.to_string(),
            message,
            details: (!details.is_empty()).then_some(details),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(code: ErrorCode) -> StatusCode {
        ApiError(DomainError::new(code, "x")).into_response().status()
    }

    #[test]
    fn maps_codes_to_statuses() {
        assert_eq!(status_of(ErrorCode::ValidationFailed), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ErrorCode::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(ErrorCode::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_of(ErrorCode::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(ErrorCode::Conflict), StatusCode::CONFLICT);
        assert_eq!(status_of(ErrorCode::RateLimited), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(status_of(ErrorCode::AIProviderError), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_of(ErrorCode::DatabaseError), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_id_is_a_validation_error() {
        let err = ApiError::parse_id::<uuid::Uuid>("id", "abc").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(ApiError::parse_id::<uuid::Uuid>("id", &uuid::Uuid::new_v4().to_string()).is_ok());
    }

    #[test]
    fn body_omits_empty_details() {
        let body = ErrorResponse {
            code: "NOT_FOUND".into(),
            message: "Review not found".into(),
            details: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("details").is_none());
    }
}
