//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;

use crate::auth::AuthError;
use crate::project::ValidationError;
use crate::store::StoreError;

/// An error ready to leave the service: a status code plus a message that
/// is safe to show the caller.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "status": "error", "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        let status = match &e {
            AuthError::HeaderMissing => StatusCode::UNAUTHORIZED,
            AuthError::PayloadMalformed(_) => StatusCode::BAD_REQUEST,
            AuthError::SignatureInvalid(_)
            | AuthError::StatementInvalid { .. }
            | AuthError::DomainInvalid { .. }
            | AuthError::NotAuthorized => StatusCode::FORBIDDEN,
            AuthError::ProjectNotFound => StatusCode::NOT_FOUND,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let AuthError::Internal(detail) = &e {
            // Full detail stays server-side; the caller gets a generic message.
            error!("Authorization check failed: {}", detail);
            return Self {
                status,
                message: "Internal server error during authorization".to_string(),
            };
        }

        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: e.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        error!("Store operation failed: {}", e);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Server error".to_string(),
        }
    }
}
