//! In-memory job store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::job::{Job, JobError, JobId, JobUpdate};
use crate::ports::JobStore;

/// Process-lifetime job registry guarded by an async `RwLock`.
///
/// Jobs are never evicted.
#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl InMemoryJobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn insert(&self, job: Job) -> Result<(), JobError> {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(job.id()) {
            return Err(JobError::AlreadyExists(job.id().clone()));
        }
        jobs.insert(job.id().clone(), job);
        Ok(())
    }

    async fn get(&self, id: &JobId) -> Result<Job, JobError> {
        self.jobs
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| JobError::NotFound(id.clone()))
    }

    async fn list(&self) -> Vec<Job> {
        let mut jobs: Vec<Job> = self.jobs.read().await.values().cloned().collect();
        jobs.sort_by(|a, b| b.id().cmp(a.id()));
        jobs
    }

    async fn transition(&self, id: &JobId, update: JobUpdate) -> Result<Job, JobError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(id)
            .ok_or_else(|| JobError::NotFound(id.clone()))?;
        let from = job.status();
        job.apply(update)?;
        tracing::debug!(
            target: "ytgrab.jobs",
            job_id = %id,
            from = %from,
            to = %job.status(),
            "Job transitioned"
        );
        Ok(job.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobStatus;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn job(id: &str) -> Job {
        Job::new(JobId::new(id), "https://example.com/v")
    }

    #[tokio::test]
    async fn insert_then_get() {
        let store = InMemoryJobStore::new();
        store.insert(job("1")).await.unwrap();

        let fetched = store.get(&JobId::new("1")).await.unwrap();
        assert_eq!(fetched.status(), JobStatus::Initializing);
        assert_eq!(fetched.url(), "https://example.com/v");
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = InMemoryJobStore::new();
        store.insert(job("1")).await.unwrap();
        let err = store.insert(job("1")).await.unwrap_err();
        assert_eq!(err, JobError::AlreadyExists(JobId::new("1")));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = InMemoryJobStore::new();
        let id = JobId::new("missing");
        assert_eq!(
            store.get(&id).await.unwrap_err(),
            JobError::NotFound(id.clone())
        );
        assert_eq!(
            store
                .transition(&id, JobUpdate::Processing)
                .await
                .unwrap_err(),
            JobError::NotFound(id)
        );
    }

    #[tokio::test]
    async fn transitions_are_validated() {
        let store = InMemoryJobStore::new();
        let id = JobId::new("1");
        store.insert(job("1")).await.unwrap();

        let err = store
            .transition(&id, JobUpdate::failed("too early"))
            .await
            .unwrap_err();
        assert!(matches!(err, JobError::InvalidTransition { .. }));
        assert_eq!(
            store.get(&id).await.unwrap().status(),
            JobStatus::Initializing
        );

        store.transition(&id, JobUpdate::Processing).await.unwrap();
        let done = store
            .transition(
                &id,
                JobUpdate::Complete {
                    filename: "a-1.mp4".into(),
                    filepath: PathBuf::from("/d/a-1.mp4"),
                },
            )
            .await
            .unwrap();
        assert_eq!(done.status(), JobStatus::Complete);
        assert_eq!(store.get(&id).await.unwrap(), done);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = InMemoryJobStore::new();
        for id in ["1700000000001", "1700000000003", "1700000000002"] {
            store.insert(job(id)).await.unwrap();
        }

        let ids: Vec<String> = store
            .list()
            .await
            .iter()
            .map(|j| j.id().to_string())
            .collect();
        assert_eq!(ids, ["1700000000003", "1700000000002", "1700000000001"]);
    }

    #[tokio::test]
    async fn concurrent_inserts_are_all_kept() {
        let store = Arc::new(InMemoryJobStore::new());
        let mut handles = Vec::new();
        for i in 0..50 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.insert(job(&i.to_string())).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(store.list().await.len(), 50);
    }
}
