use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::users::repo::StoreError;

/// Outcomes the services report to their callers. Carries no HTTP semantics.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("user email is already registered")]
    EmailExisted,
    #[error("user not found")]
    NotFound,
    #[error("account is deactivated")]
    NoPermission,
    #[error("email or password does not match")]
    EmailPasswordNotMatch,
    #[error("authorization failed")]
    AuthorizationFailed,
    #[error("no permission to modify this user")]
    NoAccessPermission,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::EmailExisted => "EMAIL_EXISTED",
            ServiceError::NotFound => "NOT_FOUND",
            ServiceError::NoPermission => "NO_PERMISSION",
            ServiceError::EmailPasswordNotMatch => "EMAIL_PASSWORD_NOT_MATCH",
            ServiceError::AuthorizationFailed => "AUTHORIZATION_FAILED",
            ServiceError::NoAccessPermission => "NO_ACCESS_PERMISSION",
            ServiceError::InvalidToken => "INVALID_TOKEN",
            ServiceError::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ServiceError::EmailExisted | ServiceError::EmailPasswordNotMatch => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::NoPermission | ServiceError::NoAccessPermission => StatusCode::FORBIDDEN,
            ServiceError::AuthorizationFailed | ServiceError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Uniqueness and absence are domain outcomes; anything else is an infrastructure fault.
impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UniqueViolation => ServiceError::EmailExisted,
            StoreError::NotFound => ServiceError::NotFound,
            StoreError::Database(e) => ServiceError::Internal(e),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Everything a handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "data": null, "message": errors })),
            )
                .into_response(),
            ApiError::Service(e) => {
                let status = e.status();
                let message = match &e {
                    ServiceError::Internal(inner) => {
                        error!(error = ?inner, "internal error");
                        "Internal server error".to_string()
                    }
                    other => other.to_string(),
                };
                (
                    status,
                    Json(json!({
                        "success": false,
                        "data": null,
                        "code": e.code(),
                        "message": message,
                    })),
                )
                    .into_response()
            }
        }
    }
}
