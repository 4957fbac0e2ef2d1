//! JSON envelope and error mapping for the REST API.
//!
//! Success: `{"status":"success","data":...}`
//! Failure: `{"status":"fail","message":...,"errors"?:{field:[msg]}}`

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::common::{AuthError, FieldErrors, ValidationError};
use crate::domains::customers::CustomerError;
use crate::domains::installers::{InstallerError, ResolveError};
use crate::domains::intake::IntakeError;
use crate::kernel::StoreError;

/// Success envelope with an explicit status code
pub struct ApiSuccess<T>(pub StatusCode, pub T);

impl<T: Serialize> ApiSuccess<T> {
    pub fn ok(data: T) -> Self {
        Self(StatusCode::OK, data)
    }

    pub fn created(data: T) -> Self {
        Self(StatusCode::CREATED, data)
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        let ApiSuccess(status, data) = self;
        (status, Json(json!({"status": "success", "data": data}))).into_response()
    }
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Validation(ValidationError),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors): (StatusCode, String, Option<FieldErrors>) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Validation(err) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string(), Some(err.errors))
            }
            ApiError::Internal(msg) => {
                error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = match errors {
            Some(errors) => json!({"status": "fail", "message": message, "errors": errors}),
            None => json!({"status": "fail", "message": message}),
        };
        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationRequired | AuthError::InvalidToken => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::AdminRequired(_) => ApiError::Forbidden(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NoFallbackConfigured => ApiError::NotFound(err.to_string()),
            ResolveError::Store(e) => e.into(),
        }
    }
}

impl From<InstallerError> for ApiError {
    fn from(err: InstallerError) -> Self {
        match err {
            InstallerError::Auth(e) => e.into(),
            InstallerError::Validation(e) => e.into(),
            InstallerError::Resolve(e) => e.into(),
            InstallerError::Store(e) => e.into(),
        }
    }
}

impl From<CustomerError> for ApiError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::Auth(e) => e.into(),
            CustomerError::Store(e) => e.into(),
        }
    }
}

impl From<IntakeError> for ApiError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::Auth(e) => e.into(),
            IntakeError::Validation(e) => e.into(),
            IntakeError::NoAssignee { .. } => ApiError::NotFound(err.to_string()),
            IntakeError::Store(e) => e.into(),
            IntakeError::Enqueue(e) => ApiError::Internal(e.to_string()),
        }
    }
}
