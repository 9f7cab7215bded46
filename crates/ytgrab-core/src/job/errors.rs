//! Job error types.

use thiserror::Error;

use super::id::JobId;
use super::types::JobStatus;

/// Errors raised by job lookups and state changes.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum JobError {
    /// No job with this id exists.
    #[error("Job not found: {0}")]
    NotFound(JobId),

    /// The job exists but has no downloadable output yet.
    #[error("Job {id} is not ready (status: {status})")]
    NotReady {
        /// The job that was asked for.
        id: JobId,
        /// Its status at the time of the lookup.
        status: JobStatus,
    },

    /// A job with this id was already inserted.
    #[error("Job already exists: {0}")]
    AlreadyExists(JobId),

    /// The requested status change is not allowed from the current status.
    #[error("Invalid transition for job {id}: {from} -> {to}")]
    InvalidTransition {
        /// The job being updated.
        id: JobId,
        /// Current status.
        from: JobStatus,
        /// Rejected target status.
        to: JobStatus,
    },

    /// Submitted input was rejected.
    #[error("Validation failed: {0}")]
    Validation(String),
}
