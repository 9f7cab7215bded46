//! `JobService`: submission and lookup of download jobs.

use std::path::PathBuf;
use std::sync::Arc;

use crate::job::{Job, JobError, JobId, JobIdGenerator};
use crate::ports::{JobLauncher, JobStore};

/// Facade used by adapters to create and inspect jobs.
///
/// Construct it at the composition root with a store and the launcher that
/// runs jobs in the background.
pub struct JobService {
    store: Arc<dyn JobStore>,
    launcher: Arc<dyn JobLauncher>,
    ids: JobIdGenerator,
}

impl JobService {
    pub fn new(store: Arc<dyn JobStore>, launcher: Arc<dyn JobLauncher>) -> Self {
        Self {
            store,
            launcher,
            ids: JobIdGenerator::new(),
        }
    }

    /// Create a job for `url` and hand it to the launcher.
    ///
    /// The returned snapshot is taken before launching, so it is always
    /// `Initializing`. Blank URLs are rejected with `JobError::Validation`.
    pub async fn submit(&self, url: &str) -> Result<Job, JobError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(JobError::Validation("No URL provided".to_string()));
        }

        let job = Job::new(self.ids.next_id(), url);
        self.store.insert(job.clone()).await?;
        tracing::info!(target: "ytgrab.jobs", job_id = %job.id(), url, "Job submitted");

        self.launcher.launch(&job);
        Ok(job)
    }

    /// Current snapshot of a job.
    pub async fn status(&self, id: &JobId) -> Result<Job, JobError> {
        self.store.get(id).await
    }

    /// All jobs, newest first.
    pub async fn list(&self) -> Vec<Job> {
        self.store.list().await
    }

    /// File name and path of a completed job's output.
    ///
    /// `NotFound` for unknown ids, `NotReady` unless the job is exactly
    /// `Complete`.
    pub async fn downloadable(&self, id: &JobId) -> Result<(String, PathBuf), JobError> {
        let job = self.store.get(id).await?;
        let (name, path) = job.download_target()?;
        Ok((name.to_string(), path.to_path_buf()))
    }
}
