//! Download error types.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const CANCELLED_MSG: &str = "download cancelled";

/// Errors that can occur while running yt-dlp for a job.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// yt-dlp exited unsuccessfully; `stderr` is its raw error output.
    #[error("yt-dlp failed: {stderr}")]
    ProcessFailed { code: Option<i32>, stderr: String },

    #[error("yt-dlp did not output a final file destination path.")]
    MissingDestination,

    #[error("Could not reliably extract the final filename from yt-dlp output.")]
    UnparseableDestination,

    #[error("File was not found at expected path: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("yt-dlp update check failed: {0}")]
    UpdateFailed(String),

    #[error("download timed out after {0:?}")]
    TimedOut(Duration),

    #[error("{}", CANCELLED_MSG)]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DownloadError {
    /// Message stored on the failed job and shown to the user.
    ///
    /// Tool failures and cancellation are shown as-is; everything else is
    /// reported as an internal error.
    pub fn job_message(&self) -> String {
        match self {
            Self::ProcessFailed { .. } | Self::Cancelled => self.to_string(),
            other => format!("An internal error occurred: {other}"),
        }
    }
}
