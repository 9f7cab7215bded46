//! Browser-facing handlers: submission form, status page, file download.

use axum::body::Body;
use axum::extract::{Form, Path, Request, State};
use axum::http::header::CONTENT_DISPOSITION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use ytgrab_core::{JobError, JobId};

use crate::error::HttpError;
use crate::pages::{index_page, job_error_page, rejected_form, status_page};
use crate::state::AppState;

/// Submission form body.
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Render the submission form.
pub async fn index() -> Html<String> {
    Html(index_page(None))
}

/// Create a job and redirect to its status page.
pub async fn submit(State(state): State<AppState>, Form(form): Form<SubmitForm>) -> Response {
    let url = form.video_url.unwrap_or_default();
    match state.jobs.submit(&url).await {
        Ok(job) => Redirect::to(&format!("/status/{}", job.id())).into_response(),
        Err(JobError::Validation(msg)) => rejected_form(&msg),
        Err(err) => HttpError::from(err).into_response(),
    }
}

/// Status page for a job.
pub async fn status(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.jobs.status(&JobId::new(id)).await {
        Ok(job) => Html(status_page(&job)).into_response(),
        Err(err) => job_error_page(err),
    }
}

/// Send the output of a completed job as an attachment.
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Request,
) -> Response {
    let id = JobId::new(id);
    let (filename, path) = match state.jobs.downloadable(&id).await {
        Ok(target) => target,
        Err(err) => return job_error_page(err),
    };

    // ServeFile guesses the content type from the extension.
    let Ok(response) = ServeFile::new(&path).oneshot(request).await;
    if response.status() == StatusCode::NOT_FOUND {
        tracing::warn!(
            target: "ytgrab.http",
            job_id = %id,
            path = %path.display(),
            "Completed job's file is missing"
        );
        return (StatusCode::NOT_FOUND, "File not ready or job failed.").into_response();
    }

    let mut response = response.map(Body::new);
    match content_disposition(&filename) {
        Ok(value) => {
            response.headers_mut().insert(CONTENT_DISPOSITION, value);
            response
        }
        Err(err) => err.into_response(),
    }
}

/// `attachment` disposition with an ASCII fallback name and an RFC 5987
/// `filename*` for the exact UTF-8 name.
fn content_disposition(filename: &str) -> Result<HeaderValue, HttpError> {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let value = format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(filename)
    );
    HeaderValue::from_str(&value)
        .map_err(|e| HttpError::Internal(format!("Invalid download filename: {e}")))
}
