//! Job store port definition.

use async_trait::async_trait;

use crate::job::{Job, JobError, JobId, JobUpdate};

/// Port for the process-wide job registry.
///
/// Implementations must be safe to share across tasks. Every status change
/// goes through [`JobStore::transition`], which validates it against the job
/// lifecycle before writing.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert a freshly created job.
    ///
    /// Returns `JobError::AlreadyExists` if the id is taken.
    async fn insert(&self, job: Job) -> Result<(), JobError>;

    /// Fetch a snapshot of a job.
    async fn get(&self, id: &JobId) -> Result<Job, JobError>;

    /// Snapshot of every job, newest first.
    async fn list(&self) -> Vec<Job>;

    /// Apply a validated status change and return the updated job.
    async fn transition(&self, id: &JobId, update: JobUpdate) -> Result<Job, JobError>;
}
