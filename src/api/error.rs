//! API error types

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::application::AppError;

/// API error types. Every variant renders as a plain-text body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("internal server error")]
    Internal,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(e) => ApiError::BadRequest(e.to_string()),
            AppError::SpendingNotFound(id) => {
                ApiError::NotFound(format!("Spending not found: {}", id))
            }
            AppError::Database(e) => {
                tracing::error!("storage failure: {:#}", e);
                ApiError::Internal
            }
            AppError::Summary(e) => {
                tracing::error!("summary failure: {}", e);
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_client_error() {
            tracing::warn!(%status, "rejected request: {}", self);
        }

        (status, self.to_string()).into_response()
    }
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;
