//! Axum-specific error types and mappings.
//!
//! Maps `JobError` to HTTP status codes and JSON response bodies for the
//! `/api` routes. HTML routes render their own plain pages (see `pages`).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use ytgrab_core::JobError;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Conflict (resource exists or is in the wrong state).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HttpError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::NotFound(msg)
            | Self::BadRequest(msg)
            | Self::Conflict(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.message(),
            status: status.as_u16(),
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<JobError> for HttpError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::NotFound(_) => Self::NotFound("Job not found".to_string()),
            JobError::NotReady { .. } => {
                Self::NotFound("File not ready or job failed.".to_string())
            }
            JobError::AlreadyExists(_) | JobError::InvalidTransition { .. } => {
                Self::Conflict(err.to_string())
            }
            JobError::Validation(msg) => Self::BadRequest(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use ytgrab_core::{JobId, JobStatus};

    #[test]
    fn job_errors_map_to_status_codes() {
        let id = JobId::new("1");
        let cases = [
            (JobError::NotFound(id.clone()), StatusCode::NOT_FOUND),
            (
                JobError::NotReady {
                    id: id.clone(),
                    status: JobStatus::Processing,
                },
                StatusCode::NOT_FOUND,
            ),
            (JobError::AlreadyExists(id.clone()), StatusCode::CONFLICT),
            (
                JobError::InvalidTransition {
                    id,
                    from: JobStatus::Complete,
                    to: JobStatus::Failed,
                },
                StatusCode::CONFLICT,
            ),
            (JobError::Validation("No URL provided".into()), StatusCode::BAD_REQUEST),
        ];

        for (err, expected) in cases {
            assert_eq!(HttpError::from(err).status_code(), expected);
        }
    }

    #[tokio::test]
    async fn body_is_json_with_error_and_status() {
        let response = HttpError::NotFound("Job not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Job not found", "status": 404}));
    }
}
