//! JSON job handlers for programmatic clients.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use ytgrab_core::{Job, JobId, JobStatus};

use crate::error::HttpError;
use crate::state::AppState;

/// Request to create a job.
#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub url: String,
}

/// Response from `create`.
#[derive(Debug, Serialize)]
pub struct CreateJobResponse {
    pub job_id: JobId,
    pub status: JobStatus,
}

/// List all jobs, newest first.
pub async fn list(State(state): State<AppState>) -> Json<Vec<Job>> {
    Json(state.jobs.list().await)
}

/// Get one job.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Job>, HttpError> {
    Ok(Json(state.jobs.status(&JobId::new(id)).await?))
}

/// Submit a URL; the job runs in the background.
///
/// Malformed bodies get the same JSON error shape as every other `/api`
/// failure instead of axum's plain-text rejection.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateJobRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateJobResponse>), HttpError> {
    let Json(req) = body.map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;
    let job = state.jobs.submit(&req.url).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(CreateJobResponse {
            job_id: job.id().clone(),
            status: job.status(),
        }),
    ))
}
