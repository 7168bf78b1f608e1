use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    /// Duplicate id. Reported as 404, matching the established API.
    #[error("{0}")]
    AlreadyExists(String),

    /// Request rejected before reaching a handler.
    #[error("invalid {location}: {message}")]
    Validation {
        location: &'static str,
        message: String,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::AlreadyExists(_) => StatusCode::NOT_FOUND,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::NotFound(msg) | AppError::AlreadyExists(msg) => json!({ "detail": msg }),
            AppError::Validation { location, message } => json!({
                "detail": [{
                    "loc": [location],
                    "msg": message,
                    "type": "value_error",
                }],
            }),
            AppError::Internal(cause) => {
                error!(%cause, "Request failed");
                json!({ "detail": "Internal Server Error" })
            }
        };
        (status, Json(body)).into_response()
    }
}

// ── Extractor rejections ──────────────────────────────────────────────────────

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation {
            location: "body",
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation {
            location: "query",
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation {
            location: "path",
            message: rejection.body_text(),
        }
    }
}
