use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::customer::validation::ValidationErrors;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

const INTERNAL_MESSAGE: &str = "an unexpected error occurred";

/// Handler error. `NotFound` is rendered as a bare 404 without a body;
/// `Internal` detail is logged and never sent to the client.
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    Validation(ValidationErrors),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for the `outcome` metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::NotFound => "not_found",
            ApiError::Validation(_) | ApiError::BadRequest(_) => "invalid",
            ApiError::Internal(_) => "error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::NotFound => status.into_response(),
            ApiError::Validation(fields) => {
                let body = serde_json::json!({
                    "error": "Validation Error",
                    "message": fields.to_string(),
                    "fields": fields,
                });
                (status, Json(body)).into_response()
            }
            ApiError::BadRequest(msg) => {
                (status, Json(serde_json::json!({"error": "Bad Request", "message": msg}))).into_response()
            }
            ApiError::Internal(detail) => {
                error!(error = %detail, "request failed");
                let body = serde_json::json!({"error": "Internal Server Error", "message": INTERNAL_MESSAGE});
                (status, Json(body)).into_response()
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(fields) => ApiError::Validation(fields),
            ServiceError::NotFound(_) => ApiError::NotFound,
            ServiceError::Db(msg) => ApiError::Internal(format!("database error: {msg}")),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
