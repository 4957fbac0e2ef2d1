//! Body and query extractors whose rejections use the API envelope.

use axum::extract::{FromRequest, FromRequestParts};

use crate::server::response::ApiError;

/// `axum::Json` that fails with `ApiError::BadRequest`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` that fails with `ApiError::BadRequest`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
