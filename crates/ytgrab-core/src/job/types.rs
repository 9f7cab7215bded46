//! Core job types.
//!
//! Pure data types with no I/O dependencies.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::errors::JobError;
use super::id::JobId;

/// Lifecycle status of a job.
///
/// Serialized exactly as the variant name (`"Initializing"`, ...), which is
/// also what the status page shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum JobStatus {
    /// Created, waiting to start.
    Initializing,
    /// The downloader is running.
    Processing,
    /// Output file is available.
    Complete,
    /// The job ended without a usable file.
    Failed,
}

impl JobStatus {
    /// Status name as shown to users.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initializing => "Initializing",
            Self::Processing => "Processing",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// `Complete` and `Failed` never change again.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }

    /// Whether `self -> next` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Initializing, Self::Processing)
                | (Self::Processing, Self::Complete | Self::Failed)
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state change requested by the job runner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobUpdate {
    /// The downloader has been started.
    Processing,
    /// The output file was produced.
    Complete {
        /// Base name of the output file.
        filename: String,
        /// Absolute path of the output file.
        filepath: PathBuf,
    },
    /// The job failed; `error` is shown to the user verbatim.
    Failed {
        /// Free-text failure message.
        error: String,
    },
}

impl JobUpdate {
    /// Status the job will have once this update is applied.
    #[must_use]
    pub const fn target_status(&self) -> JobStatus {
        match self {
            Self::Processing => JobStatus::Processing,
            Self::Complete { .. } => JobStatus::Complete,
            Self::Failed { .. } => JobStatus::Failed,
        }
    }

    /// Shorthand for a failure update.
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }
}

/// One external download invocation tracked by id and status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Job {
    id: JobId,
    url: String,
    status: JobStatus,
    filename: Option<String>,
    filepath: Option<PathBuf>,
    error: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Job {
    /// Create a job in the `Initializing` state.
    pub fn new(id: JobId, url: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            url: url.into(),
            status: JobStatus::Initializing,
            filename: None,
            filepath: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &JobId {
        &self.id
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub const fn status(&self) -> JobStatus {
        self.status
    }

    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    #[must_use]
    pub fn filepath(&self) -> Option<&Path> {
        self.filepath.as_deref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply a state change, rejecting transitions the lifecycle forbids.
    ///
    /// On error the job is left untouched.
    pub fn apply(&mut self, update: JobUpdate) -> Result<(), JobError> {
        let to = update.target_status();
        if !self.status.can_transition_to(to) {
            return Err(JobError::InvalidTransition {
                id: self.id.clone(),
                from: self.status,
                to,
            });
        }

        match update {
            JobUpdate::Processing => {}
            JobUpdate::Complete { filename, filepath } => {
                self.filename = Some(filename);
                self.filepath = Some(filepath);
            }
            JobUpdate::Failed { error } => {
                self.error = Some(error);
            }
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// File name and path to serve, only when the job is exactly `Complete`.
    pub fn download_target(&self) -> Result<(&str, &Path), JobError> {
        match (self.status, self.filename(), self.filepath()) {
            (JobStatus::Complete, Some(name), Some(path)) => Ok((name, path)),
            (status, _, _) => Err(JobError::NotReady {
                id: self.id.clone(),
                status,
            }),
        }
    }
}
