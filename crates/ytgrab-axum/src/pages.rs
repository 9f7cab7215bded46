//! Inline HTML pages for the browser-facing routes.

use std::fmt::Write;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use ytgrab_core::{Job, JobError, JobStatus};

use crate::error::HttpError;

/// Seconds between reloads of a status page for an unfinished job.
pub const STATUS_REFRESH_SECS: u32 = 3;

/// Escape text for inclusion in HTML content or a quoted attribute.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn layout(title: &str, head_extra: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n{head_extra}</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

/// The submission form, with an optional error message above it.
pub fn index_page(error: Option<&str>) -> String {
    let mut body = String::from("<h1>Video Downloader</h1>\n");
    if let Some(error) = error {
        let _ = writeln!(body, "<p class=\"error\">{}</p>", escape_html(error));
    }
    body.push_str(
        "<form method=\"post\" action=\"/\">\n\
         <label for=\"video_url\">Video URL</label>\n\
         <input type=\"url\" id=\"video_url\" name=\"video_url\" required>\n\
         <button type=\"submit\">Download</button>\n\
         </form>\n",
    );
    layout("Video Downloader", "", &body)
}

/// Status page for one job.
///
/// Reloads itself until the job is `Complete` or `Failed`.
pub fn status_page(job: &Job) -> String {
    let id = escape_html(job.id().as_str());
    let refresh = if job.status().is_terminal() {
        String::new()
    } else {
        format!("<meta http-equiv=\"refresh\" content=\"{STATUS_REFRESH_SECS}\">\n")
    };

    let mut body = format!(
        "<h1>Job {id}</h1>\n<p>URL: {}</p>\n<p>Status: <strong>{}</strong></p>\n",
        escape_html(job.url()),
        job.status()
    );
    match job.status() {
        JobStatus::Complete => {
            let name = escape_html(job.filename().unwrap_or_default());
            let _ = writeln!(body, "<p><a href=\"/download/{id}\">Download {name}</a></p>");
        }
        JobStatus::Failed => {
            let error = escape_html(job.error().unwrap_or("Unknown error"));
            let _ = writeln!(body, "<p class=\"error\">Error: {error}</p>");
        }
        JobStatus::Initializing | JobStatus::Processing => {
            body.push_str("<p>This page refreshes automatically.</p>\n");
        }
    }
    body.push_str("<p><a href=\"/\">Download another video</a></p>\n");

    layout(&format!("Job {id}"), &refresh, &body)
}

/// Plain response for lookups that failed on a browser route.
///
/// Unknown ids and unfinished jobs become 404 text pages; anything else
/// falls through to the JSON error mapping.
pub fn job_error_page(err: JobError) -> Response {
    match err {
        JobError::NotFound(_) => (StatusCode::NOT_FOUND, "Job not found").into_response(),
        JobError::NotReady { .. } => {
            (StatusCode::NOT_FOUND, "File not ready or job failed.").into_response()
        }
        other => HttpError::from(other).into_response(),
    }
}

/// Form page re-rendered with a 400 status.
pub fn rejected_form(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Html(index_page(Some(message)))).into_response()
}
