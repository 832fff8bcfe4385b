use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::error::{DomainError, Violation};

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("bad request: {0}")]
    BadRequest(String),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[schema(value_type = Vec<Object>)]
    pub(crate) violations: Vec<Violation>,
}

impl ErrorBody {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            violations: Vec::new(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Domain(DomainError::Validation(err)) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "validation failed".to_string(),
                    violations: err.into_violations(),
                },
            ),
            AppError::Domain(err @ DomainError::StoreUnavailable(_)) => {
                error!(error = %err, "post store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorBody::message("store unavailable"),
                )
            }
            AppError::Domain(err @ DomainError::WriteConflict(_)) => {
                (StatusCode::CONFLICT, ErrorBody::message(err.to_string()))
            }
            AppError::Domain(err @ DomainError::Unexpected(_)) => {
                error!(error = %err, "unexpected error while serving request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("internal error"),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::message(msg)),
        };

        (status, Json(body)).into_response()
    }
}
