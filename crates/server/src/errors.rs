use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use service::errors::{ServiceError, ValidationErrors};

/// Error returned by every handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn not_found(entity: &str) -> Self { ApiError::NotFound(format!("{entity} not found")) }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errs) => ApiError::Validation(errs),
            ServiceError::NotFound(msg) => ApiError::NotFound(msg),
            // the storage message stays in the logs
            other @ ServiceError::Storage { .. } => {
                error!(error = %other, "request failed on storage");
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        warn!(error = %e, "rejected request body");
        ApiError::BadRequest(e.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errs) => json!({ "errors": errs.errors }),
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::errors::StorageError;

    #[test]
    fn service_errors_map_to_status_codes() {
        let v: ApiError = ServiceError::validation("credential with id 3 not found").into();
        assert_eq!(v.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let n: ApiError = ServiceError::not_found("server").into();
        assert_eq!(n.status(), StatusCode::NOT_FOUND);

        let s: ApiError = ServiceError::storage("error during Server creation", StorageError::new("disk I/O error")).into();
        assert_eq!(s.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!s.to_string().contains("disk"));
    }
}
