//! Job supervision.
//!
//! [`JobSupervisor`] implements the core `JobLauncher` port: every launched
//! job runs on a task tracked by a `TaskTracker` and owns a child of the
//! supervisor's `CancellationToken`. An optional semaphore bounds how many
//! jobs run at once.

mod worker;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{info, warn};
use ytgrab_core::{Job, JobLauncher, JobStore};

use crate::ytdlp::MediaDownloader;
use worker::{WorkerDeps, WorkerJob, run_job};

/// Configuration for [`JobSupervisor`].
#[derive(Debug, Clone, Default)]
pub struct SupervisorConfig {
    /// Maximum jobs running at once; `None` is unbounded.
    pub max_concurrent: Option<usize>,
    /// Per-job limit covering the update check and the download.
    pub timeout: Option<Duration>,
}

impl SupervisorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit concurrent jobs. `0` means unbounded.
    #[must_use]
    pub const fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = if max == 0 { None } else { Some(max) };
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Owns the background tasks of all jobs.
pub struct JobSupervisor {
    deps: WorkerDeps,
    tracker: TaskTracker,
    cancel: CancellationToken,
}

impl JobSupervisor {
    pub fn new(
        store: Arc<dyn JobStore>,
        downloader: Arc<dyn MediaDownloader>,
        config: SupervisorConfig,
    ) -> Self {
        Self {
            deps: WorkerDeps {
                store,
                downloader,
                permits: config.max_concurrent.map(|n| Arc::new(Semaphore::new(n))),
                timeout: config.timeout,
            },
            tracker: TaskTracker::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Number of job tasks still alive.
    pub fn active_jobs(&self) -> usize {
        self.tracker.len()
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancel every job and wait for their tasks to finish.
    ///
    /// Running jobs end `Failed` with "download cancelled"; jobs that never
    /// started stay `Initializing`. Jobs launched afterwards are ignored.
    pub async fn shutdown(&self) {
        info!(target: "ytgrab.jobs", active = self.tracker.len(), "Shutting down job supervisor");
        self.cancel.cancel();
        self.tracker.close();
        self.tracker.wait().await;
    }
}

impl JobLauncher for JobSupervisor {
    fn launch(&self, job: &Job) {
        if self.cancel.is_cancelled() {
            warn!(
                target: "ytgrab.jobs",
                job_id = %job.id(),
                "Supervisor shut down, job not started"
            );
            return;
        }

        let work = WorkerJob {
            id: job.id().clone(),
            url: job.url().to_string(),
            cancel: self.cancel.child_token(),
        };
        self.tracker.spawn(run_job(work, self.deps.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DownloadError;
    use crate::ytdlp::{DownloadedFile, MockMediaDownloader};
    use async_trait::async_trait;
    use std::path::PathBuf;
    use tokio::sync::Notify;
    use ytgrab_core::{InMemoryJobStore, JobId, JobService, JobStatus};

    fn file(name: &str) -> DownloadedFile {
        DownloadedFile::from_path(PathBuf::from("/downloads").join(name))
    }

    /// Downloader that blocks until released (or forever).
    #[derive(Default)]
    struct GatedDownloader {
        release: Notify,
    }

    #[async_trait]
    impl MediaDownloader for GatedDownloader {
        async fn update(&self) -> Result<(), DownloadError> {
            Ok(())
        }

        async fn download(
            &self,
            job_id: &JobId,
            _url: &str,
        ) -> Result<DownloadedFile, DownloadError> {
            self.release.notified().await;
            Ok(file(&format!("clip-{job_id}.mp4")))
        }
    }

    struct Harness {
        store: Arc<InMemoryJobStore>,
        supervisor: Arc<JobSupervisor>,
        service: JobService,
    }

    fn harness(downloader: Arc<dyn MediaDownloader>, config: SupervisorConfig) -> Harness {
        let store = Arc::new(InMemoryJobStore::new());
        let supervisor = Arc::new(JobSupervisor::new(store.clone(), downloader, config));
        let service = JobService::new(store.clone(), supervisor.clone());
        Harness {
            store,
            supervisor,
            service,
        }
    }

    async fn wait_for(store: &InMemoryJobStore, id: &JobId, status: JobStatus) -> Job {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let job = store.get(id).await.unwrap();
                if job.status() == status {
                    return job;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap_or_else(|_| panic!("job {id} never reached {status}"))
    }

    #[tokio::test]
    async fn successful_download_completes_job() {
        let mut mock = MockMediaDownloader::new();
        mock.expect_update().times(1).returning(|| Ok(()));
        mock.expect_download()
            .withf(|_, url| url == "https://example.com/v")
            .times(1)
            .returning(|id, _| Ok(file(&format!("clip-{id}.mp4"))));
        let h = harness(Arc::new(mock), SupervisorConfig::new());

        let job = h.service.submit("https://example.com/v").await.unwrap();
        let done = wait_for(&h.store, job.id(), JobStatus::Complete).await;

        assert_eq!(done.filename(), Some(format!("clip-{}.mp4", job.id()).as_str()));
        assert!(done.error().is_none());
    }

    #[tokio::test]
    async fn update_failure_does_not_fail_job() {
        let mut mock = MockMediaDownloader::new();
        mock.expect_update()
            .returning(|| Err(DownloadError::UpdateFailed("no network".into())));
        mock.expect_download().returning(|_, _| Ok(file("a-1.mp4")));
        let h = harness(Arc::new(mock), SupervisorConfig::new());

        let job = h.service.submit("https://example.com/v").await.unwrap();
        wait_for(&h.store, job.id(), JobStatus::Complete).await;
    }

    #[tokio::test]
    async fn tool_failure_is_recorded_verbatim() {
        let mut mock = MockMediaDownloader::new();
        mock.expect_update().returning(|| Ok(()));
        mock.expect_download().returning(|_, _| {
            Err(DownloadError::ProcessFailed {
                code: Some(1),
                stderr: "ERROR: Video unavailable".into(),
            })
        });
        let h = harness(Arc::new(mock), SupervisorConfig::new());

        let job = h.service.submit("https://example.com/v").await.unwrap();
        let failed = wait_for(&h.store, job.id(), JobStatus::Failed).await;
        assert_eq!(failed.error(), Some("yt-dlp failed: ERROR: Video unavailable"));
    }

    #[tokio::test]
    async fn internal_failure_is_prefixed() {
        let mut mock = MockMediaDownloader::new();
        mock.expect_update().returning(|| Ok(()));
        mock.expect_download()
            .returning(|_, _| Err(DownloadError::MissingDestination));
        let h = harness(Arc::new(mock), SupervisorConfig::new());

        let job = h.service.submit("https://example.com/v").await.unwrap();
        let failed = wait_for(&h.store, job.id(), JobStatus::Failed).await;
        assert_eq!(
            failed.error(),
            Some("An internal error occurred: yt-dlp did not output a final file destination path.")
        );
    }

    #[tokio::test]
    async fn concurrency_limit_keeps_surplus_initializing() {
        let downloader = Arc::new(GatedDownloader::default());
        let h = harness(
            downloader.clone(),
            SupervisorConfig::new().with_max_concurrent(1),
        );

        let first = h.service.submit("https://example.com/1").await.unwrap();
        let second = h.service.submit("https://example.com/2").await.unwrap();

        wait_for(&h.store, first.id(), JobStatus::Processing).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(
            h.store.get(second.id()).await.unwrap().status(),
            JobStatus::Initializing
        );

        downloader.release.notify_one();
        wait_for(&h.store, first.id(), JobStatus::Complete).await;
        wait_for(&h.store, second.id(), JobStatus::Processing).await;
        downloader.release.notify_one();
        wait_for(&h.store, second.id(), JobStatus::Complete).await;
    }

    #[tokio::test]
    async fn shutdown_cancels_running_and_leaves_waiting() {
        let downloader = Arc::new(GatedDownloader::default());
        let h = harness(downloader, SupervisorConfig::new().with_max_concurrent(1));

        let running = h.service.submit("https://example.com/1").await.unwrap();
        let waiting = h.service.submit("https://example.com/2").await.unwrap();
        wait_for(&h.store, running.id(), JobStatus::Processing).await;

        h.supervisor.shutdown().await;

        let running = h.store.get(running.id()).await.unwrap();
        assert_eq!(running.status(), JobStatus::Failed);
        assert_eq!(running.error(), Some("download cancelled"));
        assert_eq!(
            h.store.get(waiting.id()).await.unwrap().status(),
            JobStatus::Initializing
        );
        assert_eq!(h.supervisor.active_jobs(), 0);
    }

    #[tokio::test]
    async fn launch_after_shutdown_is_ignored() {
        let h = harness(
            Arc::new(MockMediaDownloader::new()),
            SupervisorConfig::new(),
        );
        h.supervisor.shutdown().await;
        assert!(h.supervisor.is_shut_down());

        let job = h.service.submit("https://example.com/v").await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(
            h.store.get(job.id()).await.unwrap().status(),
            JobStatus::Initializing
        );
    }

    #[tokio::test]
    async fn timeout_fails_job() {
        let h = harness(
            Arc::new(GatedDownloader::default()),
            SupervisorConfig::new().with_timeout(Some(Duration::from_millis(50))),
        );

        let job = h.service.submit("https://example.com/slow").await.unwrap();
        let failed = wait_for(&h.store, job.id(), JobStatus::Failed).await;
        assert_eq!(
            failed.error(),
            Some("An internal error occurred: download timed out after 50ms")
        );
    }

    #[test]
    fn zero_means_unbounded() {
        assert_eq!(SupervisorConfig::new().with_max_concurrent(0).max_concurrent, None);
        assert_eq!(SupervisorConfig::new().with_max_concurrent(3).max_concurrent, Some(3));
    }
}
